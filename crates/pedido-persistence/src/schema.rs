// Esquema Diesel compartido por SQLite y Postgres.
// Tablas: trajectory_steps, pedidos, store_config
use diesel::allow_tables_to_appear_in_same_query;
diesel::table! {
    trajectory_steps (id) {
        id -> Text,
        pedido_id -> Nullable<Text>,
        status_atual -> Text,
        proximo_status -> Text,
        minutos_espera -> BigInt,
        descricao -> Nullable<Text>,
        ordem -> BigInt,
        ativo -> Bool,
        created_at_ts -> BigInt,
    }
}
diesel::table! {
    pedidos (id) {
        id -> Text,
        status -> Text,
        status_desde_ts -> BigInt,
        created_at_ts -> BigInt,
    }
}
diesel::table! {
    store_config (clave) {
        clave -> Text,
        valor -> Text,
        updated_at_ts -> BigInt,
    }
}
allow_tables_to_appear_in_same_query!(trajectory_steps, pedidos, store_config);
