// Archivo: resolver.rs
// Propósito: resolver qué trayectoria aplica a un pedido (la custom si
// existe, si no la por defecto) y buscar la regla que casa con el
// estado actual de un pedido.
use crate::repository::TrajectoryRepository;
use log::warn;
use pedido_domain::TrajectoryStep;
use std::sync::Arc;
use uuid::Uuid;

/// Resolutor de trayectorias sobre un repositorio inyectado.
///
/// Los fallos de lectura del almacén se recuperan aquí a lista vacía
/// con un `warn`: una lectura transitoria fallida no debe tumbar al
/// scheduler, y los callers tratan la lista vacía como "sin progresión
/// automática disponible".
pub struct TrajectoryResolver<T>
    where T: TrajectoryRepository
{
    repo: Arc<T>,
}

impl<T> TrajectoryResolver<T> where T: TrajectoryRepository
{
    pub fn new(repo: Arc<T>) -> Self {
        Self { repo }
    }

    /// Lista efectiva de reglas para el pedido: la trayectoria custom
    /// completa si no está vacía, si no la por defecto. No se mezclan
    /// pasos de ambas; la custom reemplaza del todo a la default para
    /// ese pedido.
    pub fn resolve(&self, pedido_id: &Uuid) -> Vec<TrajectoryStep> {
        let custom = match self.repo.get_custom_trajectory(pedido_id) {
            Ok(steps) => steps,
            Err(e) => {
                warn!("fallo leyendo trayectoria custom de {}: {}", pedido_id, e);
                Vec::new()
            }
        };
        if !custom.is_empty() {
            return ordenar(custom);
        }
        match self.repo.get_default_trajectory() {
            Ok(steps) => ordenar(steps),
            Err(e) => {
                warn!("fallo leyendo trayectoria por defecto: {}", e);
                Vec::new()
            }
        }
    }
}

/// Ordena por `ordem`; el sort estable conserva el orden de inserción
/// para empates.
fn ordenar(mut steps: Vec<TrajectoryStep>) -> Vec<TrajectoryStep> {
    steps.sort_by_key(|s| s.ordem());
    steps
}

/// Busca la regla aplicable al estado actual con dos pasadas en orden
/// de `ordem`: primero la primera coincidencia exacta, después el
/// primer comodín. La coincidencia exacta gana siempre al comodín sin
/// importar la posición en la lista. Sin coincidencia no hay próxima
/// transición definida y la progresión se detiene (no es un error).
pub fn match_rule<'a>(steps: &'a [TrajectoryStep], status_atual: &str) -> Option<&'a TrajectoryStep> {
    steps.iter()
         .find(|s| s.status_atual().matches_exact(status_atual))
         .or_else(|| steps.iter().find(|s| s.status_atual().is_any()))
}
