//! Crate `trajeto` — contratos y motor de progresión de pedidos
//!
//! Este crate define los contratos de persistencia que consume el motor
//! (`TrajectoryRepository`, `PedidoRepository`, `StoreConfigSource`),
//! el resolutor de trayectorias (custom sobre default, exacto sobre
//! comodín), el `ProgressionEngine` que decide y aplica transiciones, y
//! el servicio orquestador `TrajetoService` con el barrido del
//! scheduler. Incluye una implementación en memoria útil para pruebas
//! (`InMemoryTrajetoRepository`).
//!
//! Diseño resumido:
//! - La trayectoria efectiva de un pedido es la custom si existe, si no
//!   la por defecto; la custom reemplaza del todo, nunca se mezclan.
//! - La fuente de verdad de los vencimientos es el `status_desde`
//!   persistido + `minutos_espera` de la regla: el proceso conductor
//!   puede reiniciarse sin perder planificación.
//! - Las transiciones vencidas con tienda cerrada se difieren, nunca se
//!   descartan.
//!
//! Ejemplo rápido:
//! ```rust
//! use std::sync::Arc;
//! use trajeto::stubs::InMemoryTrajetoRepository;
//! use trajeto::TrajetoService;
//! let repo = Arc::new(InMemoryTrajetoRepository::new());
//! let service = TrajetoService::new(repo.clone(), repo.clone(), repo);
//! service.seed_default_if_empty().unwrap();
//! ```
pub mod engine;
pub mod errors;
pub mod repository;
pub mod resolver;
pub mod service;
pub mod stubs;

pub use engine::*;
pub use errors::*;
pub use repository::*;
pub use resolver::*;
pub use service::*;
pub use stubs::*;
