use pedido_domain::espera::{clamp_minutos, from_minutes, humanize, parse_human_to_minutes, to_minutes};

#[test]
fn round_trip_exacto_sobre_rango() {
  // to_minutes(from_minutes(m)) == m para todo m >= 0
  for m in 0..=10_000i64 {
    let e = from_minutes(m);
    assert_eq!(to_minutes(e.dias, e.horas, e.minutos), m, "round trip falló para {}", m);
  }
  // algunos valores grandes (varios días)
  for m in [14_400, 20_161, 100_000, 525_600] {
    let e = from_minutes(m);
    assert_eq!(to_minutes(e.dias, e.horas, e.minutos), m);
  }
}

#[test]
fn descomposicion_basica() {
  let e = from_minutes(1 * 1440 + 2 * 60 + 3);
  assert_eq!((e.dias, e.horas, e.minutos), (1, 2, 3));
  let e = from_minutes(59);
  assert_eq!((e.dias, e.horas, e.minutos), (0, 0, 59));
}

#[test]
fn entradas_negativas_se_clampan_a_cero() {
  assert_eq!(to_minutes(-1, -5, 30), 30);
  assert_eq!(to_minutes(-1, -1, -1), 0);
  assert_eq!(clamp_minutos(-42), 0);
  let e = from_minutes(-99);
  assert_eq!((e.dias, e.horas, e.minutos), (0, 0, 0));
}

#[test]
fn humanize_fronteras() {
  assert_eq!(humanize(0), "0 min");
  assert_eq!(humanize(45), "45 min");
  assert_eq!(humanize(59), "59 min");
  assert_eq!(humanize(60), "1h");
  assert_eq!(humanize(90), "1h 30min");
  assert_eq!(humanize(135), "2h 15min");
  assert_eq!(humanize(120), "2h");
  assert_eq!(humanize(1439), "23h 59min");
  assert_eq!(humanize(1440), "1 dia");
  assert_eq!(humanize(1500), "1 dia e 1h");
  assert_eq!(humanize(4320), "3 dias");
  assert_eq!(humanize(4560), "3 dias e 4h");
}

#[test]
fn humanize_descarta_minutos_a_escala_de_dias() {
  // a escala de días sólo se muestran días y horas
  assert_eq!(humanize(1441), "1 dia");
  assert_eq!(humanize(1501), "1 dia e 1h");
}

#[test]
fn parse_texto_libre() {
  assert_eq!(parse_human_to_minutes("45 min"), 45);
  assert_eq!(parse_human_to_minutes("2h 15min"), 135);
  assert_eq!(parse_human_to_minutes("2h"), 120);
  assert_eq!(parse_human_to_minutes("1 dia"), 1440);
  assert_eq!(parse_human_to_minutes("3 dias e 4h"), 4560);
  assert_eq!(parse_human_to_minutes("esperar 1 dia e 30 min"), 1470);
  // nada reconocible -> 0
  assert_eq!(parse_human_to_minutes("mañana temprano"), 0);
  assert_eq!(parse_human_to_minutes(""), 0);
}

#[test]
fn parse_invierte_humanize_bajo_escala_de_dias() {
  for m in [0, 1, 45, 59, 60, 90, 135, 600, 1439] {
    assert_eq!(parse_human_to_minutes(&humanize(m)), m, "parse(humanize({})) difiere", m);
  }
  // a escala de días el parser recupera lo que humanize muestra
  assert_eq!(parse_human_to_minutes(&humanize(1500)), 1500);
  assert_eq!(parse_human_to_minutes(&humanize(4560)), 4560);
}
