use pedido_domain::{status, SourceStatus, TrajectoryStep, WILDCARD};

#[test]
fn label_conocida_y_fallback() {
  assert_eq!(status::label("confirmado"), "Pedido confirmado");
  assert_eq!(status::label("entregue"), "Entregue");
  // id fuera del vocabulario -> se devuelve crudo, nunca falla
  assert_eq!(status::label("status_que_no_existe"), "status_que_no_existe");
}

#[test]
fn clasificacion_especial_y_terminal() {
  assert!(status::is_special("problema"));
  assert!(status::is_special("ocorrencia_entrega"));
  assert!(status::is_special("cancelado"));
  assert!(!status::is_special("confirmado"));
  assert!(!status::is_special("entregue"));

  assert!(status::is_terminal("entregue"));
  assert!(status::is_terminal("cancelado"));
  assert!(!status::is_terminal("preparando"));
  assert!(!status::is_terminal("problema"));
}

#[test]
fn source_status_desde_crudo() {
  assert_eq!(SourceStatus::from_raw("*"), SourceStatus::Any);
  assert_eq!(SourceStatus::from_raw(" * "), SourceStatus::Any);
  assert_eq!(SourceStatus::from_raw("confirmado"), SourceStatus::Exact("confirmado".into()));
  assert!(SourceStatus::Any.is_any());
  assert!(SourceStatus::from_raw("preparando").matches_exact("preparando"));
  // el comodín no cuenta como coincidencia exacta
  assert!(!SourceStatus::Any.matches_exact("preparando"));
  assert_eq!(SourceStatus::Any.as_raw(), WILDCARD);
}

#[test]
fn source_status_serde_como_string() {
  let paso = TrajectoryStep::from_parts("*", "problema", 0, None, 1).expect("paso");
  let json = serde_json::to_value(&paso).expect("serializar");
  assert_eq!(json["status_atual"], "*");
  assert_eq!(json["proximo_status"], "problema");
  let de_vuelta: TrajectoryStep = serde_json::from_value(json).expect("deserializar");
  assert_eq!(de_vuelta, paso);
  assert!(de_vuelta.status_atual().is_any());
}

#[test]
fn paso_valida_proximo_status() {
  assert!(TrajectoryStep::from_parts("confirmado", "", 5, None, 1).is_err());
  assert!(TrajectoryStep::from_parts("confirmado", "   ", 5, None, 1).is_err());
  assert!(TrajectoryStep::from_parts("confirmado", "*", 5, None, 1).is_err());
}

#[test]
fn paso_clampa_espera_negativa() {
  let paso = TrajectoryStep::from_parts("confirmado", "preparando", -15, None, 1).expect("paso");
  assert_eq!(paso.minutos_espera(), 0);
}

#[test]
fn with_ordem_reasigna_posicion() {
  let paso = TrajectoryStep::from_parts("confirmado", "preparando", 8, Some("armado".into()), 7).expect("paso");
  assert_eq!(paso.ordem(), 7);
  let paso = paso.with_ordem(1);
  assert_eq!(paso.ordem(), 1);
  assert_eq!(paso.proximo_status(), "preparando");
  assert_eq!(paso.descricao(), Some("armado"));
}
