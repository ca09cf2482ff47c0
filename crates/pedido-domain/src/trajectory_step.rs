// trajectory_step.rs
use crate::espera;
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comodín usado en la configuración para "cualquier estado actual".
pub const WILDCARD: &str = "*";

/// Estado fuente de una regla de transición.
///
/// Se modela como unión etiquetada en vez de comparar strings con `*`
/// repartidos por el código: la precedencia exacto-antes-que-comodín
/// queda explícita en el resolver y no depende de la posición en la
/// lista.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceStatus {
  /// Casa con cualquier estado actual (`*` en la configuración).
  Any,
  /// Casa sólo con el estado exacto.
  Exact(String),
}

impl SourceStatus {
  pub fn from_raw(raw: &str) -> Self {
    let raw = raw.trim();
    if raw == WILDCARD {
      SourceStatus::Any
    } else {
      SourceStatus::Exact(raw.to_string())
    }
  }

  /// Forma cruda tal como se persiste (`*` para el comodín).
  pub fn as_raw(&self) -> &str {
    match self {
      SourceStatus::Any => WILDCARD,
      SourceStatus::Exact(s) => s,
    }
  }

  pub fn is_any(&self) -> bool {
    matches!(self, SourceStatus::Any)
  }

  /// True sólo para la coincidencia exacta; el comodín no cuenta aquí.
  pub fn matches_exact(&self, status: &str) -> bool {
    matches!(self, SourceStatus::Exact(s) if s == status)
  }
}

impl From<String> for SourceStatus {
  fn from(raw: String) -> Self {
    SourceStatus::from_raw(&raw)
  }
}

impl From<SourceStatus> for String {
  fn from(s: SourceStatus) -> Self {
    s.as_raw().to_string()
  }
}

impl fmt::Display for SourceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_raw())
  }
}

/// Regla configurada de transición dentro de una trayectoria.
///
/// `ordem` define la posición del paso dentro de la trayectoria; dentro
/// de una misma trayectoria los pasos están unívocamente ordenados por
/// ese campo y el motor los evalúa en ese orden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryStep {
  status_atual: SourceStatus,
  proximo_status: String,
  minutos_espera: i64,
  descricao: Option<String>,
  ordem: i64,
}

impl TrajectoryStep {
  pub fn new(status_atual: SourceStatus,
             proximo_status: &str,
             minutos_espera: i64,
             descricao: Option<String>,
             ordem: i64)
             -> Result<Self, DomainError> {
    let proximo = proximo_status.trim();
    if proximo.is_empty() {
      return Err(DomainError::ValidationError("proximo_status no puede estar vacío".to_string()));
    }
    if proximo == WILDCARD {
      return Err(DomainError::ValidationError("proximo_status no puede ser el comodín".to_string()));
    }
    // Espera negativa o malformada se clampa a 0 en la frontera del
    // códec en vez de propagarse al cálculo de vencimientos.
    Ok(Self { status_atual,
              proximo_status: proximo.to_string(),
              minutos_espera: espera::clamp_minutos(minutos_espera),
              descricao,
              ordem })
  }

  /// Reconstruye un paso desde sus partes crudas (persistencia, formularios).
  pub fn from_parts(status_atual_raw: &str,
                    proximo_status: &str,
                    minutos_espera: i64,
                    descricao: Option<String>,
                    ordem: i64)
                    -> Result<Self, DomainError> {
    Self::new(SourceStatus::from_raw(status_atual_raw), proximo_status, minutos_espera, descricao, ordem)
  }

  pub fn status_atual(&self) -> &SourceStatus {
    &self.status_atual
  }

  pub fn proximo_status(&self) -> &str {
    &self.proximo_status
  }

  pub fn minutos_espera(&self) -> i64 {
    self.minutos_espera
  }

  pub fn descricao(&self) -> Option<&str> {
    self.descricao.as_deref()
  }

  pub fn ordem(&self) -> i64 {
    self.ordem
  }

  /// Copia del paso con otra posición; lo usan los replace que asignan
  /// `ordem = índice + 1` al insertar la lista nueva.
  pub fn with_ordem(mut self, ordem: i64) -> Self {
    self.ordem = ordem;
    self
  }
}

impl fmt::Display for TrajectoryStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "{} -> {} ({})",
           self.status_atual,
           self.proximo_status,
           espera::humanize(self.minutos_espera))
  }
}
