// Archivo: repository.rs
// Propósito: definir los contratos de persistencia que consume el motor
// (`TrajectoryRepository`, `PedidoRepository`) y la fuente de
// configuración de la tienda (`StoreConfigSource`). Describe el contrato
// que deben implementar las persistencias (Diesel, in-memory, etc.).
use crate::errors::Result;
use chrono::{DateTime, Utc};
use pedido_domain::{BusinessHours, TrajectoryStep};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado mínimo de un pedido visto por el motor: el estado actual y el
/// instante en que entró en él. El motor nunca lee ni escribe ningún
/// otro campo del pedido (cliente, items, dirección).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoStatus {
    pub pedido_id: Uuid,
    pub status: String,
    pub status_desde: DateTime<Utc>,
}

/// Contrato del almacén de trayectorias.
///
/// La trayectoria por defecto es configuración compartida de lectura
/// frecuente; se reemplaza siempre como colección completa (borrar e
/// insertar dentro de una operación atómica), nunca campo a campo. Un
/// lector concurrente no debe observar jamás una lista a medio escribir.
pub trait TrajectoryRepository: Send + Sync {
    /// Pasos activos de la trayectoria por defecto, ordenados por `ordem`.
    fn get_default_trajectory(&self) -> Result<Vec<TrajectoryStep>>;

    /// Reemplaza la trayectoria por defecto completa: elimina los pasos
    /// existentes e inserta la lista dada asignando `ordem = índice + 1`.
    /// Debe ser efectivamente atómico para los lectores.
    fn replace_default_trajectory(&self, steps: &[TrajectoryStep]) -> Result<()>;

    /// Trayectoria custom del pedido, ordenada por `ordem`. Lista vacía
    /// si el pedido no tiene trayectoria propia.
    fn get_custom_trajectory(&self, pedido_id: &Uuid) -> Result<Vec<TrajectoryStep>>;

    /// Reemplaza la trayectoria custom del pedido (borrar e insertar
    /// acotado al `pedido_id`, `ordem = índice + 1`). A lo sumo existe
    /// una trayectoria custom por pedido.
    fn replace_custom_trajectory(&self, pedido_id: &Uuid, steps: &[TrajectoryStep]) -> Result<()>;

    /// Elimina todos los pasos custom del pedido; en la próxima
    /// resolución el pedido vuelve a la trayectoria por defecto.
    fn clear_custom_trajectory(&self, pedido_id: &Uuid) -> Result<()>;
}

/// Contrato del colaborador de pedidos.
pub trait PedidoRepository: Send + Sync {
    /// Crea un pedido con el estado inicial dado y devuelve su id.
    fn create_pedido(&self, status: &str, desde: DateTime<Utc>) -> Result<Uuid>;

    /// Estado actual del pedido. `NotFound` si no existe.
    fn get_pedido(&self, pedido_id: &Uuid) -> Result<PedidoStatus>;

    /// Actualiza el estado persistido del pedido y su `status_desde`.
    /// Este es el único efecto que no puede tragarse en silencio: un
    /// fallo aquí debe llegar al caller.
    fn update_pedido_status(&self, pedido_id: &Uuid, novo_status: &str, desde: DateTime<Utc>) -> Result<()>;

    /// Pedidos en estados no terminales, candidatos del barrido del
    /// scheduler.
    fn list_pedidos_ativos(&self) -> Result<Vec<PedidoStatus>>;
}

/// Fuente de configuración de la tienda. El motor sólo lee el horario
/// semanal; la edición es del panel de administración.
pub trait StoreConfigSource: Send + Sync {
    fn get_business_hours(&self) -> Result<BusinessHours>;
}
