use crate::schema;
use crate::schema::pedidos::dsl as pedidos_dsl;
use crate::schema::store_config::dsl as config_dsl;
use crate::schema::trajectory_steps::dsl as steps_dsl;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::Error as DieselError;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::warn;
use pedido_domain::{status, BusinessHours, TrajectoryStep};
use std::sync::Arc;
use trajeto::errors::{Result, TrajetoError};
use trajeto::repository::{PedidoRepository, PedidoStatus, StoreConfigSource, TrajectoryRepository};
use uuid::Uuid;
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
/// Clave del documento de horario semanal en `store_config`.
pub const BUSINESS_HOURS_KEY: &str = "business_hours";
#[cfg(feature = "pg")]
type DbPool = Pool<ConnectionManager<PgConnection>>;
#[cfg(not(feature = "pg"))]
type DbPool = Pool<ConnectionManager<SqliteConnection>>;
#[cfg(feature = "pg")]
type DbConn = PgConnection;
#[cfg(not(feature = "pg"))]
type DbConn = SqliteConnection;
/// Repo Diesel que implementa los contratos de `trajeto`
/// (`TrajectoryRepository`, `PedidoRepository`, `StoreConfigSource`).
pub struct DieselTrajetoRepository {
  pool: Arc<DbPool>,
}
impl DieselTrajetoRepository {
  pub fn new(database_url: &str) -> Self {
    let manager = ConnectionManager::<DbConn>::new(database_url);
    let pool = Pool::builder().max_size(4).build(manager).expect("no se pudo crear el pool de conexiones");
    let repo = DieselTrajetoRepository { pool: Arc::new(pool) };
    if let Ok(mut c) = repo.conn_raw() {
      #[cfg(not(feature = "pg"))]
      {
        let _ = diesel::sql_query("PRAGMA journal_mode = WAL;").execute(&mut c);
        let _ = diesel::sql_query("PRAGMA busy_timeout = 5000;").execute(&mut c);
      }
      let _ = c.run_pending_migrations(MIGRATIONS);
    }
    repo
  }
  fn conn_raw(&self) -> std::result::Result<PooledConnection<ConnectionManager<DbConn>>, r2d2::Error> {
    self.pool.get()
  }
  fn conn(&self) -> Result<PooledConnection<ConnectionManager<DbConn>>> {
    self.conn_raw().map_err(|e| TrajetoError::Storage(format!("pool: {}", e)))
  }

  /// Reemplaza el documento de horario semanal (lo llama el panel de
  /// administración; el motor sólo lee).
  pub fn set_business_hours(&self, horarios: &BusinessHours) -> Result<()> {
    let mut conn = self.conn()?;
    let valor = serde_json::to_string(horarios).map_err(|e| TrajetoError::Other(format!("serializar horario: {}", e)))?;
    let row = StoreConfigRow { clave: BUSINESS_HOURS_KEY.to_string(), valor, updated_at_ts: Utc::now().timestamp() };
    map_db_err(conn.transaction::<_, DieselError, _>(|conn| {
                 diesel::delete(config_dsl::store_config.filter(config_dsl::clave.eq(BUSINESS_HOURS_KEY))).execute(conn)?;
                 diesel::insert_into(config_dsl::store_config).values(&row).execute(conn)?;
                 Ok(())
               }))
  }
}
// Diesel row structs for the trajectory tables
#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = schema::trajectory_steps)]
struct TrajectoryStepRow {
  pub id: String,
  pub pedido_id: Option<String>,
  pub status_atual: String,
  pub proximo_status: String,
  pub minutos_espera: i64,
  pub descricao: Option<String>,
  pub ordem: i64,
  pub ativo: bool,
  pub created_at_ts: i64,
}
#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = schema::pedidos)]
struct PedidoRow {
  pub id: String,
  pub status: String,
  pub status_desde_ts: i64,
  pub created_at_ts: i64,
}
#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = schema::store_config)]
struct StoreConfigRow {
  pub clave: String,
  pub valor: String,
  pub updated_at_ts: i64,
}
fn map_db_err<T>(res: std::result::Result<T, DieselError>) -> Result<T> {
  res.map_err(|e| TrajetoError::Storage(format!("db: {}", e)))
}
fn ts_a_fecha(ts: i64) -> DateTime<Utc> {
  DateTime::from_timestamp(ts, 0).unwrap_or(DateTime::UNIX_EPOCH)
}
/// Construye las filas de un replace: `ordem = índice + 1`, activas.
fn filas_de_pasos(steps: &[TrajectoryStep], pedido_id: Option<&Uuid>, now_ts: i64) -> Vec<TrajectoryStepRow> {
  steps.iter()
       .enumerate()
       .map(|(i, paso)| TrajectoryStepRow { id: Uuid::new_v4().to_string(),
                                            pedido_id: pedido_id.map(|u| u.to_string()),
                                            status_atual: paso.status_atual().as_raw().to_string(),
                                            proximo_status: paso.proximo_status().to_string(),
                                            minutos_espera: paso.minutos_espera(),
                                            descricao: paso.descricao().map(|s| s.to_string()),
                                            ordem: (i + 1) as i64,
                                            ativo: true,
                                            created_at_ts: now_ts })
       .collect()
}
fn paso_de_fila(row: TrajectoryStepRow) -> Result<TrajectoryStep> {
  TrajectoryStep::from_parts(&row.status_atual, &row.proximo_status, row.minutos_espera, row.descricao, row.ordem)
    .map_err(|e| TrajetoError::Storage(format!("paso corrupto en trajectory_steps: {}", e)))
}
fn pedido_de_fila(row: PedidoRow) -> Result<PedidoStatus> {
  let id = Uuid::parse_str(&row.id).map_err(|e| TrajetoError::Storage(format!("uuid inválido en pedidos: {}", e)))?;
  Ok(PedidoStatus { pedido_id: id, status: row.status, status_desde: ts_a_fecha(row.status_desde_ts) })
}
impl TrajectoryRepository for DieselTrajetoRepository {
  fn get_default_trajectory(&self) -> Result<Vec<TrajectoryStep>> {
    let mut conn = self.conn()?;
    let rows = map_db_err(steps_dsl::trajectory_steps.filter(steps_dsl::pedido_id.is_null())
                                                     .filter(steps_dsl::ativo.eq(true))
                                                     .order(steps_dsl::ordem.asc())
                                                     .load::<TrajectoryStepRow>(&mut conn))?;
    rows.into_iter().map(paso_de_fila).collect()
  }
  /// Borrar-e-insertar dentro de una transacción: un lector concurrente
  /// nunca observa la trayectoria a medio reemplazar.
  fn replace_default_trajectory(&self, steps: &[TrajectoryStep]) -> Result<()> {
    let mut conn = self.conn()?;
    let rows = filas_de_pasos(steps, None, Utc::now().timestamp());
    map_db_err(conn.transaction::<_, DieselError, _>(|conn| {
                 diesel::delete(steps_dsl::trajectory_steps.filter(steps_dsl::pedido_id.is_null())).execute(conn)?;
                 if !rows.is_empty() {
                   diesel::insert_into(steps_dsl::trajectory_steps).values(&rows).execute(conn)?;
                 }
                 Ok(())
               }))
  }
  fn get_custom_trajectory(&self, pedido_id: &Uuid) -> Result<Vec<TrajectoryStep>> {
    let mut conn = self.conn()?;
    let id_s = pedido_id.to_string();
    let rows = map_db_err(steps_dsl::trajectory_steps.filter(steps_dsl::pedido_id.eq(&id_s))
                                                     .filter(steps_dsl::ativo.eq(true))
                                                     .order(steps_dsl::ordem.asc())
                                                     .load::<TrajectoryStepRow>(&mut conn))?;
    rows.into_iter().map(paso_de_fila).collect()
  }
  fn replace_custom_trajectory(&self, pedido_id: &Uuid, steps: &[TrajectoryStep]) -> Result<()> {
    let mut conn = self.conn()?;
    let id_s = pedido_id.to_string();
    let rows = filas_de_pasos(steps, Some(pedido_id), Utc::now().timestamp());
    map_db_err(conn.transaction::<_, DieselError, _>(|conn| {
                 diesel::delete(steps_dsl::trajectory_steps.filter(steps_dsl::pedido_id.eq(&id_s))).execute(conn)?;
                 if !rows.is_empty() {
                   diesel::insert_into(steps_dsl::trajectory_steps).values(&rows).execute(conn)?;
                 }
                 Ok(())
               }))
  }
  fn clear_custom_trajectory(&self, pedido_id: &Uuid) -> Result<()> {
    let mut conn = self.conn()?;
    let id_s = pedido_id.to_string();
    map_db_err(diesel::delete(steps_dsl::trajectory_steps.filter(steps_dsl::pedido_id.eq(&id_s))).execute(&mut conn))?;
    Ok(())
  }
}
impl PedidoRepository for DieselTrajetoRepository {
  fn create_pedido(&self, status_inicial: &str, desde: DateTime<Utc>) -> Result<Uuid> {
    let mut conn = self.conn()?;
    let id = Uuid::new_v4();
    let row = PedidoRow { id: id.to_string(),
                          status: status_inicial.to_string(),
                          status_desde_ts: desde.timestamp(),
                          created_at_ts: Utc::now().timestamp() };
    map_db_err(diesel::insert_into(pedidos_dsl::pedidos).values(&row).execute(&mut conn))?;
    Ok(id)
  }
  fn get_pedido(&self, pedido_id: &Uuid) -> Result<PedidoStatus> {
    let mut conn = self.conn()?;
    let id_s = pedido_id.to_string();
    let opt = map_db_err(pedidos_dsl::pedidos.filter(pedidos_dsl::id.eq(&id_s))
                                             .first::<PedidoRow>(&mut conn)
                                             .optional())?;
    match opt {
      Some(row) => pedido_de_fila(row),
      None => Err(TrajetoError::NotFound(format!("pedido {}", pedido_id))),
    }
  }
  fn update_pedido_status(&self, pedido_id: &Uuid, novo_status: &str, desde: DateTime<Utc>) -> Result<()> {
    let mut conn = self.conn()?;
    let id_s = pedido_id.to_string();
    let afectadas = map_db_err(diesel::update(pedidos_dsl::pedidos.filter(pedidos_dsl::id.eq(&id_s)))
      .set((pedidos_dsl::status.eq(novo_status), pedidos_dsl::status_desde_ts.eq(desde.timestamp())))
      .execute(&mut conn))?;
    if afectadas == 0 {
      return Err(TrajetoError::NotFound(format!("pedido {}", pedido_id)));
    }
    Ok(())
  }
  fn list_pedidos_ativos(&self) -> Result<Vec<PedidoStatus>> {
    let mut conn = self.conn()?;
    let rows = map_db_err(pedidos_dsl::pedidos.order(pedidos_dsl::created_at_ts.asc())
                                              .load::<PedidoRow>(&mut conn))?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
      let pedido = pedido_de_fila(row)?;
      if !status::is_terminal(&pedido.status) {
        out.push(pedido);
      }
    }
    Ok(out)
  }
}
impl StoreConfigSource for DieselTrajetoRepository {
  fn get_business_hours(&self) -> Result<BusinessHours> {
    let mut conn = self.conn()?;
    let opt = map_db_err(config_dsl::store_config.filter(config_dsl::clave.eq(BUSINESS_HOURS_KEY))
                                                 .select(config_dsl::valor)
                                                 .first::<String>(&mut conn)
                                                 .optional())?;
    let valor = match opt {
      Some(v) => v,
      // sin documento de horario la tienda cuenta como cerrada
      None => return Ok(BusinessHours::new()),
    };
    match serde_json::from_str::<BusinessHours>(&valor) {
      Ok(horarios) => Ok(horarios),
      Err(e) => {
        warn!("documento de horario corrupto en store_config: {}", e);
        Ok(BusinessHours::new())
      }
    }
  }
}
/// Crear repo desde las variables de entorno. Con el backend SQLite, si
/// no hay URL configurada se usa una base en memoria compartida.
#[cfg(not(feature = "pg"))]
pub fn new_from_env() -> Result<DieselTrajetoRepository> {
  dotenvy::dotenv().ok();
  let url = std::env::var("PEDIDO_DB_URL").or_else(|_| std::env::var("DATABASE_URL"))
                                          .unwrap_or_else(|_| "file:pedidosdb?mode=memory&cache=shared".into());
  Ok(DieselTrajetoRepository::new(&url))
}
/// Con el backend Postgres la URL es obligatoria y debe parecer de
/// Postgres; espejo del patrón de `new_from_env` del resto del sistema.
#[cfg(feature = "pg")]
pub fn new_from_env() -> Result<DieselTrajetoRepository> {
  dotenvy::dotenv().ok();
  let url = std::env::var("PEDIDO_DB_URL").or_else(|_| std::env::var("DATABASE_URL"))
                                          .map_err(|_| TrajetoError::Storage("PEDIDO_DB_URL / DATABASE_URL not set".into()))?;
  let l = url.to_lowercase();
  if !(l.starts_with("postgres") || l.starts_with("postgresql://") || url.contains('@')) {
    return Err(TrajetoError::Storage("PEDIDO_DB_URL / DATABASE_URL does not look like Postgres URL".into()));
  }
  Ok(DieselTrajetoRepository::new(&url))
}
// Test helper: construye el repositorio sobre una URL SQLite explícita,
// sin pasar por las variables de entorno.
#[cfg(not(feature = "pg"))]
pub fn new_sqlite_for_test(database_url: &str) -> DieselTrajetoRepository {
  DieselTrajetoRepository::new(database_url)
}
