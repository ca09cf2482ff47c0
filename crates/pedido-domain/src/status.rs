// status.rs
//
// Vocabulario de estados de pedido. Los identificadores son strings
// opacos que vienen del checkout/panel; aquí se mapean a etiquetas
// legibles y se clasifican en especiales (alcanzables desde cualquier
// estado vía comodín) y terminales (sin transiciones salientes).
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const CONFIRMADO: &str = "confirmado";
pub const PAGAMENTO_APROVADO: &str = "pagamento_aprovado";
pub const PREPARANDO: &str = "preparando";
pub const AGUARDANDO_COLETA: &str = "aguardando_coleta";
pub const COLETADO: &str = "coletado";
pub const EM_TRANSITO: &str = "em_transito";
pub const SAIU_PARA_ENTREGA: &str = "saiu_para_entrega";
pub const ENTREGUE: &str = "entregue";
pub const CANCELADO: &str = "cancelado";
pub const PROBLEMA: &str = "problema";
pub const OCORRENCIA_ENTREGA: &str = "ocorrencia_entrega";
pub const MOTOBOY_DESTINO: &str = "motoboy_destino";
pub const AGUARDANDO_CLIENTE: &str = "aguardando_cliente";
pub const ENDERECO_INCORRETO: &str = "endereco_incorreto";
pub const CLIENTE_AUSENTE: &str = "cliente_ausente";

static LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
  HashMap::from([(CONFIRMADO, "Pedido confirmado"),
                 (PAGAMENTO_APROVADO, "Pagamento aprovado"),
                 (PREPARANDO, "Preparando pedido"),
                 (AGUARDANDO_COLETA, "Aguardando coleta"),
                 (COLETADO, "Coletado pela transportadora"),
                 (EM_TRANSITO, "Em trânsito"),
                 (SAIU_PARA_ENTREGA, "Saiu para entrega"),
                 (ENTREGUE, "Entregue"),
                 (CANCELADO, "Cancelado"),
                 (PROBLEMA, "Problema com o pedido"),
                 (OCORRENCIA_ENTREGA, "Ocorrência na entrega"),
                 (MOTOBOY_DESTINO, "Motoboy a caminho do destino"),
                 (AGUARDANDO_CLIENTE, "Aguardando cliente"),
                 (ENDERECO_INCORRETO, "Endereço incorreto"),
                 (CLIENTE_AUSENTE, "Cliente ausente")])
});

/// Estados especiales/absorbentes: pueden entrarse desde cualquier
/// estado actual (fuente comodín `*`).
const ESPECIALES: &[&str] =
  &[PROBLEMA, OCORRENCIA_ENTREGA, MOTOBOY_DESTINO, AGUARDANDO_CLIENTE, ENDERECO_INCORRETO, CLIENTE_AUSENTE, CANCELADO];

/// Estados terminales: nunca progresan automáticamente aunque exista
/// una regla configurada para ellos.
const TERMINALES: &[&str] = &[ENTREGUE, CANCELADO];

/// Etiqueta legible para un estado. Si el id no está en el vocabulario
/// se devuelve el id crudo tal cual; nunca falla.
pub fn label(id: &str) -> String {
  LABELS.get(id).map(|l| l.to_string()).unwrap_or_else(|| id.to_string())
}

pub fn is_special(id: &str) -> bool {
  ESPECIALES.contains(&id)
}

pub fn is_terminal(id: &str) -> bool {
  TERMINALES.contains(&id)
}
