// business_hours.rs
//
// Horario semanal de la tienda y la compuerta que decide si la
// progresión automática está permitida en un instante dado. La clave
// canónica de día es `monday`..`sunday` en minúsculas; el horario es
// configuración de sólo lectura desde la perspectiva del motor.
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Horario de un día: apertura/cierre como `HH:MM`, o marcado cerrado.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
  #[serde(default, alias = "start")]
  pub open: Option<String>,
  #[serde(default, alias = "end")]
  pub close: Option<String>,
  #[serde(default)]
  pub closed: bool,
}

impl DaySchedule {
  pub fn abierto(open: &str, close: &str) -> Self {
    Self { open: Some(open.to_string()), close: Some(close.to_string()), closed: false }
  }

  pub fn cerrado() -> Self {
    Self { open: None, close: None, closed: true }
  }
}

/// Horario semanal completo, indexado por clave canónica de día.
pub type BusinessHours = HashMap<String, DaySchedule>;

/// Clave canónica para un día de la semana.
pub fn day_key(dia: Weekday) -> &'static str {
  match dia {
    Weekday::Mon => "monday",
    Weekday::Tue => "tuesday",
    Weekday::Wed => "wednesday",
    Weekday::Thu => "thursday",
    Weekday::Fri => "friday",
    Weekday::Sat => "saturday",
    Weekday::Sun => "sunday",
  }
}

/// Parsea `HH:MM` a minutos desde medianoche. Cualquier malformación
/// devuelve `None` y la compuerta trata ese día como cerrado.
fn parse_hhmm(s: &str) -> Option<i64> {
  let (h, m) = s.trim().split_once(':')?;
  let h: i64 = h.parse().ok()?;
  let m: i64 = m.parse().ok()?;
  if !(0..=23).contains(&h) || !(0..=59).contains(&m) {
    return None;
  }
  Some(h * 60 + m)
}

/// Decide si la tienda está abierta en `now`.
///
/// Día ausente, marcado cerrado, o con horas faltantes/malformadas ->
/// `false`: la configuración rota falla hacia "no progresar" y nunca
/// lanza. La comparación es inclusiva en ambos extremos y no soporta
/// ventanas que crucen medianoche (cierre anterior a apertura produce
/// una ventana siempre falsa para ese día).
///
/// Sin efectos ni caché: debe reevaluarse en cada decisión del
/// scheduler porque el horario puede cambiar entre llamadas.
pub fn is_open_now(horarios: &BusinessHours, now: NaiveDateTime) -> bool {
  let dia = match horarios.get(day_key(now.weekday())) {
    Some(d) => d,
    None => return false,
  };
  if dia.closed {
    return false;
  }
  let abre = dia.open.as_deref().and_then(parse_hhmm);
  let cierra = dia.close.as_deref().and_then(parse_hhmm);
  let (abre, cierra) = match (abre, cierra) {
    (Some(a), Some(c)) => (a, c),
    _ => return false,
  };
  let ahora = i64::from(now.time().hour()) * 60 + i64::from(now.time().minute());
  abre <= ahora && ahora <= cierra
}
