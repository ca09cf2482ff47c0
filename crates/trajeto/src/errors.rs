// Archivo: errors.rs
// Propósito: definir los errores del motor de trayectorias y el alias
// Result<T> usado por las APIs del crate.
use thiserror::Error;
/// Errores comunes del motor de trayectorias.
///
/// - `NotFound`: entidad no encontrada.
/// - `Conflict`: conflicto de concurrencia o de estado.
/// - `Storage`: error al acceder al almacenamiento externo.
/// - `Other`: cualquier otro error.
#[derive(Error, Debug)]
pub enum TrajetoError {
  /// Entidad no encontrada (por ejemplo, pedido).
  #[error("No encontrado: {0}")]
  NotFound(String),
  /// Conflicto de concurrencia o de estado.
  #[error("Conflicto: {0}")]
  Conflict(String),
  /// Error genérico de almacenamiento (BD, etc.).
  #[error("Error de almacenamiento: {0}")]
  Storage(String),
  /// Otro tipo de error.
  #[error("Otro: {0}")]
  Other(String),
}
/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, TrajetoError>;

impl From<pedido_domain::DomainError> for TrajetoError {
  fn from(e: pedido_domain::DomainError) -> Self {
    TrajetoError::Other(e.to_string())
  }
}
