// espera.rs
//
// Códec de tiempos de espera (dwell). La forma canónica es el entero
// de minutos totales; la forma estructurada días/horas/minutos existe
// para los formularios del panel y para mostrar texto legible.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MINUTOS_POR_HORA: i64 = 60;
pub const MINUTOS_POR_DIA: i64 = 24 * MINUTOS_POR_HORA;

/// Descomposición estructurada de un total de minutos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Espera {
  pub dias: i64,
  pub horas: i64,
  pub minutos: i64,
}

/// Clampa un valor configurado a minutos no negativos. Valores
/// malformados en la capa de entrada llegan aquí como negativos y se
/// tratan como 0 en vez de propagarse al cálculo de vencimientos.
pub fn clamp_minutos(v: i64) -> i64 {
  v.max(0)
}

/// `dias*1440 + horas*60 + minutos`, con cada componente clampada a no
/// negativa.
pub fn to_minutes(dias: i64, horas: i64, minutos: i64) -> i64 {
  clamp_minutos(dias) * MINUTOS_POR_DIA + clamp_minutos(horas) * MINUTOS_POR_HORA + clamp_minutos(minutos)
}

/// Inversa exacta de `to_minutes`: para todo `m >= 0`,
/// `to_minutes(e.dias, e.horas, e.minutos) == m` con `e = from_minutes(m)`.
pub fn from_minutes(total: i64) -> Espera {
  let total = clamp_minutos(total);
  Espera { dias: total / MINUTOS_POR_DIA,
           horas: (total % MINUTOS_POR_DIA) / MINUTOS_POR_HORA,
           minutos: total % MINUTOS_POR_HORA }
}

/// Texto legible para un total de minutos:
/// - bajo 60: `"45 min"`
/// - bajo 1440: `"2h 15min"`, o `"2h"` si el resto es cero
/// - desde 1440: `"3 dias"` / `"3 dias e 4h"` (singular `"1 dia"`);
///   los minutos sueltos no se muestran a escala de días.
pub fn humanize(total_minutos: i64) -> String {
  let total = clamp_minutos(total_minutos);
  if total < MINUTOS_POR_HORA {
    return format!("{} min", total);
  }
  if total < MINUTOS_POR_DIA {
    let horas = total / MINUTOS_POR_HORA;
    let resto = total % MINUTOS_POR_HORA;
    return if resto == 0 { format!("{}h", horas) } else { format!("{}h {}min", horas, resto) };
  }
  let e = from_minutes(total);
  let unidad = if e.dias == 1 { "dia" } else { "dias" };
  if e.horas == 0 {
    format!("{} {}", e.dias, unidad)
  } else {
    format!("{} {} e {}h", e.dias, unidad, e.horas)
  }
}

static RE_DIAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*dias?").expect("regex de días inválida"));
static RE_HORAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*h(?:oras?)?").expect("regex de horas inválida"));
static RE_MINUTOS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*min(?:utos?)?").expect("regex de minutos inválida"));

/// Extracción best-effort de un total de minutos desde texto libre.
///
/// Reconoce las familias `N dia(s)`, `Nh` y `N min`; los componentes
/// ausentes aportan 0 y si nada casa se devuelve 0. Es un parser con
/// pérdida pensado para texto escrito por operadores, no una gramática
/// estricta.
pub fn parse_human_to_minutes(texto: &str) -> i64 {
  let capturar = |re: &Regex| {
    re.captures(texto)
      .and_then(|c| c.get(1))
      .and_then(|m| m.as_str().parse::<i64>().ok())
      .unwrap_or(0)
  };
  to_minutes(capturar(&RE_DIAS), capturar(&RE_HORAS), capturar(&RE_MINUTOS))
}
