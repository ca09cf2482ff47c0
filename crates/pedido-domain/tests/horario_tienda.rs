use chrono::{NaiveDate, NaiveDateTime};
use pedido_domain::{day_key, is_open_now, BusinessHours, DaySchedule};

// 2026-08-03 es lunes
fn lunes(h: u32, m: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2026, 8, 3).unwrap().and_hms_opt(h, m, 0).unwrap()
}

fn semana_laboral() -> BusinessHours {
  let mut horarios = BusinessHours::new();
  for dia in ["monday", "tuesday", "wednesday", "thursday", "friday"] {
    horarios.insert(dia.to_string(), DaySchedule::abierto("08:00", "18:00"));
  }
  horarios.insert("saturday".to_string(), DaySchedule::abierto("09:00", "13:00"));
  horarios.insert("sunday".to_string(), DaySchedule::cerrado());
  horarios
}

#[test]
fn abierto_dentro_de_la_ventana() {
  let horarios = semana_laboral();
  assert!(is_open_now(&horarios, lunes(8, 0))); // inclusivo en apertura
  assert!(is_open_now(&horarios, lunes(12, 30)));
  assert!(is_open_now(&horarios, lunes(18, 0))); // inclusivo en cierre
}

#[test]
fn cerrado_fuera_de_la_ventana() {
  let horarios = semana_laboral();
  assert!(!is_open_now(&horarios, lunes(7, 59)));
  assert!(!is_open_now(&horarios, lunes(18, 1)));
  assert!(!is_open_now(&horarios, lunes(23, 45)));
}

#[test]
fn dia_marcado_cerrado() {
  let horarios = semana_laboral();
  // 2026-08-09 es domingo
  let domingo = NaiveDate::from_ymd_opt(2026, 8, 9).unwrap().and_hms_opt(12, 0, 0).unwrap();
  assert!(!is_open_now(&horarios, domingo));
}

#[test]
fn dia_ausente_cuenta_como_cerrado() {
  let mut horarios = semana_laboral();
  horarios.remove("monday");
  assert!(!is_open_now(&horarios, lunes(12, 0)));
}

#[test]
fn horas_malformadas_cuentan_como_cerrado() {
  let mut horarios = BusinessHours::new();
  horarios.insert("monday".to_string(), DaySchedule::abierto("25:00", "18:00"));
  assert!(!is_open_now(&horarios, lunes(12, 0)));
  horarios.insert("monday".to_string(), DaySchedule::abierto("ab:cd", "18:00"));
  assert!(!is_open_now(&horarios, lunes(12, 0)));
  horarios.insert("monday".to_string(),
                  DaySchedule { open: None, close: Some("18:00".to_string()), closed: false });
  assert!(!is_open_now(&horarios, lunes(12, 0)));
}

#[test]
fn cierre_antes_de_apertura_es_ventana_siempre_falsa() {
  // no se soporta cruzar medianoche: ese día nunca abre
  let mut horarios = BusinessHours::new();
  horarios.insert("monday".to_string(), DaySchedule::abierto("20:00", "04:00"));
  assert!(!is_open_now(&horarios, lunes(22, 0)));
  assert!(!is_open_now(&horarios, lunes(2, 0)));
  assert!(!is_open_now(&horarios, lunes(12, 0)));
}

#[test]
fn alias_start_end_en_el_documento() {
  let json = r#"{ "monday": { "start": "08:00", "end": "18:00" } }"#;
  let horarios: BusinessHours = serde_json::from_str(json).expect("horario");
  assert!(is_open_now(&horarios, lunes(10, 0)));
}

#[test]
fn claves_canonicas_de_dia() {
  assert_eq!(day_key(chrono::Weekday::Mon), "monday");
  assert_eq!(day_key(chrono::Weekday::Sun), "sunday");
}
