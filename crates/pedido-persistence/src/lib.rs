//! Implementación Diesel de los contratos de persistencia del motor de
//! trayectorias (`TrajectoryRepository`, `PedidoRepository`,
//! `StoreConfigSource`). Este archivo expone el módulo `schema` y
//! reexporta el repositorio Diesel; la implementación detallada está en
//! `trajeto_persistence.rs`.

pub mod schema;
mod trajeto_persistence;

#[cfg(not(feature = "pg"))]
pub use trajeto_persistence::new_sqlite_for_test;
pub use trajeto_persistence::{new_from_env, DieselTrajetoRepository, BUSINESS_HOURS_KEY, MIGRATIONS};
