// Archivo: engine.rs
// Propósito: implementar el `ProgressionEngine`, el planificador que
// decide si un pedido debe avanzar de estado, cuándo, y aplica (o
// difiere) la transición.
//
// El motor es síncrono y sin estado propio: la fuente de verdad de los
// vencimientos es el `status_desde` persistido más los minutos de
// espera de la regla, de modo que un reinicio del proceso conductor no
// pierde nada de planificación.
use crate::errors::Result;
use crate::repository::{PedidoRepository, StoreConfigSource, TrajectoryRepository};
use crate::resolver::{match_rule, TrajectoryResolver};
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use pedido_domain::{is_open_now, status};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Decisión del motor para un pedido en un instante dado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransitionDecision {
    /// La regla existe pero aún no vence; `due_at` sirve para que el
    /// caller programe el próximo barrido, no para aplicar nada.
    Pending { proximo_status: String, due_at: DateTime<Utc> },
    /// La transición venció pero la tienda está cerrada: diferida, no
    /// cancelada. El próximo barrido con tienda abierta la aplica.
    Deferred { proximo_status: String, due_at: DateTime<Utc> },
    /// Transición aplicada: el estado persistido del pedido ya cambió y
    /// su `status_desde` es `applied_at`.
    Applied { proximo_status: String, applied_at: DateTime<Utc> },
}

/// Motor de progresión de pedidos.
///
/// Consulta el resolutor de trayectorias y la compuerta de horario en
/// cada decisión (el horario nunca se cachea más allá de una decisión)
/// y aplica a lo sumo una transición por invocación.
pub struct ProgressionEngine<T, P, C>
    where T: TrajectoryRepository,
          P: PedidoRepository,
          C: StoreConfigSource
{
    resolver: TrajectoryResolver<T>,
    pedidos: Arc<P>,
    config: Arc<C>,
}

impl<T, P, C> ProgressionEngine<T, P, C>
    where T: TrajectoryRepository,
          P: PedidoRepository,
          C: StoreConfigSource
{
    pub fn new(trajectories: Arc<T>, pedidos: Arc<P>, config: Arc<C>) -> Self {
        Self { resolver: TrajectoryResolver::new(trajectories), pedidos, config }
    }

    /// Decide la próxima transición del pedido en estado `status_atual`
    /// desde `status_desde`, evaluada en `now`.
    ///
    /// - Estado terminal o sin regla aplicable -> `Ok(None)`.
    /// - `now < due_at` -> `Pending` (sin cambios).
    /// - Vencida con tienda cerrada (o con horario ilegible) ->
    ///   `Deferred` (sin cambios; se reintenta en el próximo barrido).
    /// - Vencida con tienda abierta -> actualiza el estado persistido
    ///   (`status_desde = now`) y devuelve `Applied`. Un fallo de
    ///   escritura se propaga: ese efecto no se traga en silencio.
    ///
    /// Reinvocar tras una transición aplicada recomputa desde el estado
    /// nuevo, nunca re-aplica la misma regla.
    pub fn compute_next_transition(&self,
                                   pedido_id: &Uuid,
                                   status_atual: &str,
                                   status_desde: DateTime<Utc>,
                                   now: DateTime<Utc>)
                                   -> Result<Option<TransitionDecision>> {
        if status::is_terminal(status_atual) {
            return Ok(None);
        }
        let pasos = self.resolver.resolve(pedido_id);
        let regla = match match_rule(&pasos, status_atual) {
            Some(r) => r,
            None => return Ok(None),
        };
        let proximo = regla.proximo_status().to_string();
        let due_at = status_desde + Duration::minutes(regla.minutos_espera());
        if now < due_at {
            return Ok(Some(TransitionDecision::Pending { proximo_status: proximo, due_at }));
        }
        // La compuerta se reevalúa en cada decisión. Un horario ilegible
        // cuenta como cerrado: la configuración rota difiere en vez de
        // progresar a cualquier hora.
        let horarios = match self.config.get_business_hours() {
            Ok(h) => h,
            Err(e) => {
                warn!("fallo leyendo horario de la tienda: {}", e);
                return Ok(Some(TransitionDecision::Deferred { proximo_status: proximo, due_at }));
            }
        };
        // El horario se interpreta en el mismo reloj con el que el
        // conductor alimenta `now`.
        if !is_open_now(&horarios, now.naive_utc()) {
            debug!("pedido {} vencido pero tienda cerrada; transición diferida", pedido_id);
            return Ok(Some(TransitionDecision::Deferred { proximo_status: proximo, due_at }));
        }
        self.pedidos.update_pedido_status(pedido_id, &proximo, now)?;
        Ok(Some(TransitionDecision::Applied { proximo_status: proximo, applied_at: now }))
    }

    /// Variante que lee el pedido del repositorio y delega. Un fallo de
    /// lectura del pedido se recupera a `None` con `warn`: no hay regla
    /// disponible y el motor no hace nada.
    pub fn advance_pedido(&self, pedido_id: &Uuid, now: DateTime<Utc>) -> Result<Option<TransitionDecision>> {
        let pedido = match self.pedidos.get_pedido(pedido_id) {
            Ok(p) => p,
            Err(e) => {
                warn!("fallo leyendo pedido {}: {}", pedido_id, e);
                return Ok(None);
            }
        };
        self.compute_next_transition(pedido_id, &pedido.status, pedido.status_desde, now)
    }
}
