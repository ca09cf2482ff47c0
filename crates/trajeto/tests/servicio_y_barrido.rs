use chrono::{DateTime, Duration, TimeZone, Utc};
use pedido_domain::{status, TrajectoryStep};
use std::sync::Arc;
use trajeto::stubs::{horario_siempre_abierto, InMemoryTrajetoRepository};
use trajeto::{seed_steps, PedidoRepository, TrajetoService};
use uuid::Uuid;

fn paso(de: &str, a: &str, minutos: i64, ordem: i64) -> TrajectoryStep {
    TrajectoryStep::from_parts(de, a, minutos, None, ordem).expect("paso")
}

// lunes 2026-08-03 10:00 UTC
fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).unwrap()
}

fn servicio() -> (Arc<InMemoryTrajetoRepository>,
                  TrajetoService<InMemoryTrajetoRepository, InMemoryTrajetoRepository, InMemoryTrajetoRepository>) {
    let repo = Arc::new(InMemoryTrajetoRepository::new());
    repo.set_business_hours(horario_siempre_abierto());
    let service = TrajetoService::new(repo.clone(), repo.clone(), repo.clone());
    (repo, service)
}

#[test]
fn siembra_solo_cuando_esta_vacia() {
    let (_repo, service) = servicio();
    assert!(service.seed_default_if_empty().expect("seed"));
    let pasos = service.default_trajectory().expect("default");
    assert_eq!(pasos.len(), seed_steps().unwrap().len());
    assert_eq!(pasos[0].status_atual().as_raw(), status::CONFIRMADO);
    assert_eq!(pasos[0].proximo_status(), status::PAGAMENTO_APROVADO);
    assert_eq!(pasos.last().unwrap().proximo_status(), status::ENTREGUE);

    // segunda llamada: ya hay pasos, no vuelve a sembrar
    assert!(!service.seed_default_if_empty().expect("seed"));
}

#[test]
fn personalizar_copia_la_default_como_punto_de_partida() {
    let (_repo, service) = servicio();
    service.seed_default_if_empty().expect("seed");
    let pedido = service.create_pedido(status::CONFIRMADO, t0()).expect("pedido");

    let copia = service.customize_pedido(&pedido).expect("customize");
    assert_eq!(copia.len(), service.default_trajectory().unwrap().len());

    // editar la copia no toca la default
    service.replace_custom(&pedido, &[paso(status::CONFIRMADO, status::ENTREGUE, 1, 1)])
           .expect("replace custom");
    assert_eq!(service.resolve(&pedido).len(), 1);
    assert_eq!(service.default_trajectory().unwrap().len(), seed_steps().unwrap().len());

    // restablecer vuelve a la default vigente
    service.reset_pedido(&pedido).expect("reset");
    assert_eq!(service.resolve(&pedido).len(), seed_steps().unwrap().len());
}

#[test]
fn barrido_aplica_los_vencidos_y_cuenta_los_demas() {
    let (repo, service) = servicio();
    service.replace_default(&[paso("confirmado", "preparando", 8, 1)]).expect("default");

    let vencido = service.create_pedido("confirmado", t0()).expect("pedido");
    let reciente = service.create_pedido("confirmado", t0() + Duration::minutes(7)).expect("pedido");

    let resumen = service.tick(t0() + Duration::minutes(9));
    assert_eq!(resumen.aplicados, vec![(vencido, "preparando".to_string())]);
    assert_eq!(resumen.pendientes, 1);
    assert_eq!(resumen.diferidos, 0);
    assert!(resumen.fallos.is_empty());

    assert_eq!(repo.get_pedido(&vencido).unwrap().status, "preparando");
    assert_eq!(repo.get_pedido(&reciente).unwrap().status, "confirmado");
}

#[test]
fn barrido_con_tienda_cerrada_difiere_y_luego_aplica() {
    let (repo, service) = servicio();
    service.replace_default(&[paso("confirmado", "preparando", 8, 1)]).expect("default");
    repo.set_business_hours(Default::default());
    let pedido = service.create_pedido("confirmado", t0()).expect("pedido");

    let resumen = service.tick(t0() + Duration::minutes(9));
    assert_eq!(resumen.diferidos, 1);
    assert!(resumen.aplicados.is_empty());
    assert_eq!(repo.get_pedido(&pedido).unwrap().status, "confirmado");

    // abre la tienda: el mismo vencimiento se aplica en el próximo barrido
    repo.set_business_hours(horario_siempre_abierto());
    let resumen = service.tick(t0() + Duration::minutes(10));
    assert_eq!(resumen.aplicados.len(), 1);
    assert_eq!(repo.get_pedido(&pedido).unwrap().status, "preparando");
}

#[test]
fn cancelado_queda_fuera_de_los_barridos() {
    let (repo, service) = servicio();
    service.replace_default(&[paso("*", "problema", 0, 1)]).expect("default");
    let pedido = service.create_pedido("confirmado", t0()).expect("pedido");

    service.cancel_pedido(&pedido, t0() + Duration::minutes(1)).expect("cancelar");
    assert_eq!(repo.get_pedido(&pedido).unwrap().status, status::CANCELADO);

    // terminal: ni aparece entre los activos ni se computa transición
    let resumen = service.tick(t0() + Duration::hours(2));
    assert!(resumen.aplicados.is_empty());
    assert_eq!(resumen.pendientes, 0);
    assert_eq!(repo.get_pedido(&pedido).unwrap().status, status::CANCELADO);
}

#[test]
fn resolve_de_pedido_desconocido_usa_la_default() {
    let (_repo, service) = servicio();
    service.seed_default_if_empty().expect("seed");
    let pasos = service.resolve(&Uuid::new_v4());
    assert_eq!(pasos.len(), seed_steps().unwrap().len());
}
