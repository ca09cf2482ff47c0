// Archivo: service.rs
// Propósito: implementar `TrajetoService`, la capa orquestadora que
// expone las operaciones de alto nivel sobre trayectorias y pedidos
// (sembrar, personalizar, restablecer, barrido del scheduler). Esta
// capa es la que invoca el panel de administración o el proceso
// conductor.
use crate::engine::{ProgressionEngine, TransitionDecision};
use crate::errors::{Result, TrajetoError};
use crate::repository::{PedidoRepository, StoreConfigSource, TrajectoryRepository};
use crate::resolver::TrajectoryResolver;
use chrono::{DateTime, Utc};
use log::{info, warn};
use pedido_domain::{status, SourceStatus, TrajectoryStep};
use std::sync::Arc;
use uuid::Uuid;

/// Resumen de un barrido del scheduler sobre los pedidos activos.
#[derive(Debug, Default)]
pub struct TickSummary {
    /// Transiciones aplicadas: (pedido, nuevo estado).
    pub aplicados: Vec<(Uuid, String)>,
    /// Pedidos con regla vigente pero aún no vencida.
    pub pendientes: usize,
    /// Transiciones vencidas diferidas por tienda cerrada.
    pub diferidos: usize,
    /// Fallos de escritura al aplicar; se devuelven al caller en vez de
    /// abortar el barrido completo.
    pub fallos: Vec<(Uuid, TrajetoError)>,
}

/// Servicio de alto nivel sobre el repositorio y el motor.
pub struct TrajetoService<T, P, C>
    where T: TrajectoryRepository,
          P: PedidoRepository,
          C: StoreConfigSource
{
    trajectories: Arc<T>,
    pedidos: Arc<P>,
    resolver: TrajectoryResolver<T>,
    engine: ProgressionEngine<T, P, C>,
}

impl<T, P, C> TrajetoService<T, P, C>
    where T: TrajectoryRepository,
          P: PedidoRepository,
          C: StoreConfigSource
{
    pub fn new(trajectories: Arc<T>, pedidos: Arc<P>, config: Arc<C>) -> Self {
        let resolver = TrajectoryResolver::new(trajectories.clone());
        let engine = ProgressionEngine::new(trajectories.clone(), pedidos.clone(), config);
        Self { trajectories, pedidos, resolver, engine }
    }

    /// Siembra la secuencia base si la trayectoria por defecto está
    /// vacía. Devuelve `true` si sembró. La siembra es un fallback de
    /// instalación, no un requisito de corrección: el panel puede
    /// reemplazarla entera cuando quiera.
    pub fn seed_default_if_empty(&self) -> Result<bool> {
        if !self.trajectories.get_default_trajectory()?.is_empty() {
            return Ok(false);
        }
        let pasos = seed_steps()?;
        self.trajectories.replace_default_trajectory(&pasos)?;
        info!("trayectoria por defecto sembrada con {} pasos", pasos.len());
        Ok(true)
    }

    pub fn default_trajectory(&self) -> Result<Vec<TrajectoryStep>> {
        self.trajectories.get_default_trajectory()
    }

    /// Reemplaza la trayectoria por defecto completa. El reordenado del
    /// panel es una permutación del array antes de llamar aquí; no hay
    /// operación separada de "reordenar".
    pub fn replace_default(&self, steps: &[TrajectoryStep]) -> Result<()> {
        self.trajectories.replace_default_trajectory(steps)
    }

    /// Crea la trayectoria custom del pedido copiando la por defecto
    /// como punto de partida, y la devuelve. Si ya había una, se
    /// reemplaza entera.
    pub fn customize_pedido(&self, pedido_id: &Uuid) -> Result<Vec<TrajectoryStep>> {
        let base = self.trajectories.get_default_trajectory()?;
        self.trajectories.replace_custom_trajectory(pedido_id, &base)?;
        self.trajectories.get_custom_trajectory(pedido_id)
    }

    pub fn replace_custom(&self, pedido_id: &Uuid, steps: &[TrajectoryStep]) -> Result<()> {
        self.trajectories.replace_custom_trajectory(pedido_id, steps)
    }

    /// Elimina la trayectoria custom; el pedido vuelve a la por defecto
    /// en la próxima resolución.
    pub fn reset_pedido(&self, pedido_id: &Uuid) -> Result<()> {
        self.trajectories.clear_custom_trajectory(pedido_id)
    }

    /// Lista efectiva de reglas del pedido (custom si existe, si no la
    /// por defecto).
    pub fn resolve(&self, pedido_id: &Uuid) -> Vec<TrajectoryStep> {
        self.resolver.resolve(pedido_id)
    }

    pub fn create_pedido(&self, status_inicial: &str, desde: DateTime<Utc>) -> Result<Uuid> {
        self.pedidos.create_pedido(status_inicial, desde)
    }

    pub fn get_pedido(&self, pedido_id: &Uuid) -> Result<crate::repository::PedidoStatus> {
        self.pedidos.get_pedido(pedido_id)
    }

    pub fn list_pedidos_ativos(&self) -> Result<Vec<crate::repository::PedidoStatus>> {
        self.pedidos.list_pedidos_ativos()
    }

    /// Cancela un pedido por acción explícita del operador. `cancelado`
    /// es terminal: el motor no computa más transiciones para él.
    pub fn cancel_pedido(&self, pedido_id: &Uuid, now: DateTime<Utc>) -> Result<()> {
        self.pedidos.update_pedido_status(pedido_id, status::CANCELADO, now)
    }

    /// Un barrido del scheduler: evalúa cada pedido activo en `now` y
    /// aplica las transiciones vencidas con tienda abierta.
    ///
    /// El conductor externo llama esto a intervalo fijo (p.ej. cada
    /// 30-60 s) en vez de mantener un timer por pedido: las esperas van
    /// de minutos a varios días y los timers no sobreviven reinicios.
    /// Los fallos de lectura del listado se recuperan a barrido vacío;
    /// los fallos de escritura por pedido se recogen en el resumen.
    pub fn tick(&self, now: DateTime<Utc>) -> TickSummary {
        let mut resumen = TickSummary::default();
        let pedidos = match self.pedidos.list_pedidos_ativos() {
            Ok(v) => v,
            Err(e) => {
                warn!("fallo listando pedidos activos: {}", e);
                return resumen;
            }
        };
        for pedido in pedidos {
            match self.engine.compute_next_transition(&pedido.pedido_id, &pedido.status, pedido.status_desde, now) {
                Ok(None) => {}
                Ok(Some(TransitionDecision::Pending { .. })) => resumen.pendientes += 1,
                Ok(Some(TransitionDecision::Deferred { .. })) => resumen.diferidos += 1,
                Ok(Some(TransitionDecision::Applied { proximo_status, .. })) => {
                    resumen.aplicados.push((pedido.pedido_id, proximo_status));
                }
                Err(e) => resumen.fallos.push((pedido.pedido_id, e)),
            }
        }
        resumen
    }

    pub fn engine(&self) -> &ProgressionEngine<T, P, C> {
        &self.engine
    }
}

/// Secuencia base de instalación: confirmación y pago con esperas
/// cortas, logística con esperas de minutos a horas.
pub fn seed_steps() -> Result<Vec<TrajectoryStep>> {
    let secuencia = [(status::CONFIRMADO, status::PAGAMENTO_APROVADO, 1),
                     (status::PAGAMENTO_APROVADO, status::PREPARANDO, 1),
                     (status::PREPARANDO, status::AGUARDANDO_COLETA, 30),
                     (status::AGUARDANDO_COLETA, status::COLETADO, 60),
                     (status::COLETADO, status::EM_TRANSITO, 120),
                     (status::EM_TRANSITO, status::SAIU_PARA_ENTREGA, 240),
                     (status::SAIU_PARA_ENTREGA, status::ENTREGUE, 60)];
    let mut pasos = Vec::with_capacity(secuencia.len());
    for (i, (de, a, minutos)) in secuencia.iter().enumerate() {
        pasos.push(TrajectoryStep::new(SourceStatus::Exact(de.to_string()), a, *minutos, None, (i + 1) as i64)?);
    }
    Ok(pasos)
}
