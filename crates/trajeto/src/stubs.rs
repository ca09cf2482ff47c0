// Archivo: stubs.rs
// Propósito: implementaciones en memoria para pruebas y wiring rápido.
//
// Incluye un repositorio en memoria (`InMemoryTrajetoRepository`) que
// implementa los tres contratos del crate sobre `Mutex<HashMap>`. No es
// durable; se usa para demos y pruebas locales.
use crate::errors::{Result, TrajetoError};
use crate::repository::{PedidoRepository, PedidoStatus, StoreConfigSource, TrajectoryRepository};
use chrono::{DateTime, Utc};
use pedido_domain::{status, BusinessHours, DaySchedule, TrajectoryStep};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Horario que abre todos los días el día completo; útil en pruebas y
/// demos donde la compuerta no es lo que se está ejercitando.
pub fn horario_siempre_abierto() -> BusinessHours {
    let mut horarios = BusinessHours::new();
    for dia in ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"] {
        horarios.insert(dia.to_string(), DaySchedule::abierto("00:00", "23:59"));
    }
    horarios
}

// Minimal in-memory repository for wiring examples (not durable)
pub struct InMemoryTrajetoRepository {
    /// Pasos de la trayectoria por defecto.
    default_steps: Mutex<Vec<TrajectoryStep>>,
    /// Pasos custom indexados por pedido.
    custom_steps: Mutex<HashMap<Uuid, Vec<TrajectoryStep>>>,
    /// Estado de los pedidos indexado por id.
    pedidos: Mutex<HashMap<Uuid, PedidoStatus>>,
    /// Horario semanal configurado; mapa vacío cuenta como cerrado.
    horarios: Mutex<BusinessHours>,
}

impl InMemoryTrajetoRepository {
    /// Crea una nueva instancia del repositorio en memoria.
    pub fn new() -> Self {
        Self { default_steps: Mutex::new(Vec::new()),
               custom_steps: Mutex::new(HashMap::new()),
               pedidos: Mutex::new(HashMap::new()),
               horarios: Mutex::new(BusinessHours::new()) }
    }

    /// Reemplaza el horario semanal configurado.
    pub fn set_business_hours(&self, horarios: BusinessHours) {
        *self.horarios.lock().unwrap_or_else(|e| e.into_inner()) = horarios;
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `TrajetoError::Storage`.
    fn lock<'a, T>(&'a self, m: &'a Mutex<T>) -> std::result::Result<MutexGuard<'a, T>, TrajetoError> {
        m.lock().map_err(|e| TrajetoError::Storage(format!("mutex poisoned: {:?}", e)))
    }
}

impl Default for InMemoryTrajetoRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Reasigna `ordem = índice + 1` sobre la lista entrante, igual que
/// hacen los replace durables.
fn renumerar(steps: &[TrajectoryStep]) -> Vec<TrajectoryStep> {
    steps.iter().cloned().enumerate().map(|(i, s)| s.with_ordem((i + 1) as i64)).collect()
}

fn ordenada(mut steps: Vec<TrajectoryStep>) -> Vec<TrajectoryStep> {
    steps.sort_by_key(|s| s.ordem());
    steps
}

impl TrajectoryRepository for InMemoryTrajetoRepository {
    fn get_default_trajectory(&self) -> Result<Vec<TrajectoryStep>> {
        Ok(ordenada(self.lock(&self.default_steps)?.clone()))
    }

    /// Reemplazo completo bajo el mismo lock: un lector nunca observa la
    /// lista a medias.
    fn replace_default_trajectory(&self, steps: &[TrajectoryStep]) -> Result<()> {
        *self.lock(&self.default_steps)? = renumerar(steps);
        Ok(())
    }

    fn get_custom_trajectory(&self, pedido_id: &Uuid) -> Result<Vec<TrajectoryStep>> {
        Ok(ordenada(self.lock(&self.custom_steps)?.get(pedido_id).cloned().unwrap_or_default()))
    }

    fn replace_custom_trajectory(&self, pedido_id: &Uuid, steps: &[TrajectoryStep]) -> Result<()> {
        self.lock(&self.custom_steps)?.insert(*pedido_id, renumerar(steps));
        Ok(())
    }

    fn clear_custom_trajectory(&self, pedido_id: &Uuid) -> Result<()> {
        self.lock(&self.custom_steps)?.remove(pedido_id);
        Ok(())
    }
}

impl PedidoRepository for InMemoryTrajetoRepository {
    fn create_pedido(&self, status: &str, desde: DateTime<Utc>) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let pedido = PedidoStatus { pedido_id: id, status: status.to_string(), status_desde: desde };
        self.lock(&self.pedidos)?.insert(id, pedido);
        Ok(id)
    }

    fn get_pedido(&self, pedido_id: &Uuid) -> Result<PedidoStatus> {
        self.lock(&self.pedidos)?
            .get(pedido_id)
            .cloned()
            .ok_or(TrajetoError::NotFound(format!("pedido {}", pedido_id)))
    }

    fn update_pedido_status(&self, pedido_id: &Uuid, novo_status: &str, desde: DateTime<Utc>) -> Result<()> {
        let mut pedidos = self.lock(&self.pedidos)?;
        let pedido = pedidos.get_mut(pedido_id)
                            .ok_or(TrajetoError::NotFound(format!("pedido {}", pedido_id)))?;
        pedido.status = novo_status.to_string();
        pedido.status_desde = desde;
        Ok(())
    }

    fn list_pedidos_ativos(&self) -> Result<Vec<PedidoStatus>> {
        let mut ativos: Vec<PedidoStatus> =
            self.lock(&self.pedidos)?.values().filter(|p| !status::is_terminal(&p.status)).cloned().collect();
        // orden determinista para los barridos y las pruebas
        ativos.sort_by_key(|p| p.pedido_id);
        Ok(ativos)
    }
}

impl StoreConfigSource for InMemoryTrajetoRepository {
    fn get_business_hours(&self) -> Result<BusinessHours> {
        Ok(self.lock(&self.horarios)?.clone())
    }
}
