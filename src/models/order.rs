// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Status de envio do pedido. O fluxo pretendido é PLACED -> SHIPPED -> DELIVERED,
// mas o painel permite reatribuir livremente entre os três valores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_shipping_status", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum OrderShippingStatus {
    Placed,    // pedido feito
    Shipped,   // enviado
    Delivered, // chegou ao destino
}

impl OrderShippingStatus {
    /// Parser tolerante usado nos filtros do painel.
    /// Token vazio ou irreconhecível vira "sem filtro", nunca um erro.
    pub fn parse_filter(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "PLACED" => Some(Self::Placed),
            "SHIPPED" => Some(Self::Shipped),
            "DELIVERED" => Some(Self::Delivered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "PLACED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
        }
    }
}

/// Pedido realizado na loja. Em memória funciona como raiz do agregado:
/// as linhas vivem dentro do pedido e o total só muda passando por elas.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub shipping_status: OrderShippingStatus,

    // Pagamento é independente do status de envio
    pub paid: bool,

    // Sempre derivado das linhas; zero para pedido sem linhas
    pub total_amount: Decimal,

    // Definido uma única vez na criação
    pub created_at: DateTime<Utc>,

    // As linhas não vêm da mesma consulta do pedido; o service monta o agregado
    #[sqlx(skip)]
    pub items: Vec<OrderItem>,
}

/// Uma linha do pedido, com preço congelado no momento da compra
/// (mesmo se o produto mudar depois).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Entrada mínima para criar uma linha: o preço unitário vem do catálogo,
/// nunca do chamador.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

impl OrderItem {
    pub fn new(product_id: Uuid, quantity: i32, unit_price: Decimal) -> Self {
        let mut item = Self {
            id: Uuid::new_v4(),
            order_id: Uuid::nil(), // vinculado ao entrar no agregado
            product_id,
            quantity,
            unit_price,
            line_total: Decimal::ZERO,
        };
        item.recalculate_line_total();
        item
    }

    /// Recalcula o total da linha. Roda na criação e em toda alteração de
    /// quantidade/preço, antes do total do pedido ser recomputado.
    pub fn recalculate_line_total(&mut self) {
        if self.quantity < 1 {
            self.quantity = 1;
        }
        self.line_total = self.unit_price * Decimal::from(self.quantity);
    }
}

impl Order {
    pub fn new(customer_name: &str, customer_email: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_name: customer_name.to_owned(),
            customer_email: customer_email.map(|e| e.to_owned()),
            shipping_status: OrderShippingStatus::Placed,
            paid: false,
            total_amount: Decimal::ZERO,
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    /// Anexa uma linha ao pedido: grava a referência de volta, adiciona à
    /// coleção e recalcula o total.
    pub fn add_item(&mut self, mut item: OrderItem) {
        item.order_id = self.id;
        self.items.push(item);
        self.recalculate_total();
    }

    /// Remove a linha pelo id, limpa a referência e recalcula o total.
    /// Retorna a linha removida para o chamador apagar do banco.
    pub fn remove_item(&mut self, item_id: Uuid) -> Option<OrderItem> {
        let position = self.items.iter().position(|item| item.id == item_id)?;
        let mut removed = self.items.remove(position);
        removed.order_id = Uuid::nil();
        self.recalculate_total();
        Some(removed)
    }

    /// Soma os totais das linhas atuais e sobrescreve o total do pedido.
    /// Idempotente: sem mudança nas linhas, o resultado não muda.
    pub fn recalculate_total(&mut self) {
        self.total_amount = self.items.iter().map(|item| item.line_total).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn pedido_sem_linhas_tem_total_zero() {
        let mut order = Order::new("Maria", None);
        order.recalculate_total();
        assert_eq!(order.total_amount, Decimal::ZERO);
    }

    #[test]
    fn total_acompanha_adicao_e_remocao_de_linhas() {
        let mut order = Order::new("Maria", Some("maria@example.com"));

        let first = OrderItem::new(Uuid::new_v4(), 3, dec("10.00"));
        let first_id = first.id;
        assert_eq!(first.line_total, dec("30.00"));

        order.add_item(first);
        assert_eq!(order.total_amount, dec("30.00"));

        let second = OrderItem::new(Uuid::new_v4(), 2, dec("5.50"));
        assert_eq!(second.line_total, dec("11.00"));

        order.add_item(second);
        assert_eq!(order.total_amount, dec("41.00"));

        let removed = order.remove_item(first_id).unwrap();
        assert_eq!(removed.order_id, Uuid::nil());
        assert_eq!(order.total_amount, dec("11.00"));
    }

    #[test]
    fn adicionar_linha_grava_referencia_de_volta() {
        let mut order = Order::new("João", None);
        order.add_item(OrderItem::new(Uuid::new_v4(), 1, dec("2.50")));
        assert_eq!(order.items[0].order_id, order.id);
    }

    #[test]
    fn quantidade_menor_que_um_vira_um() {
        let mut item = OrderItem::new(Uuid::new_v4(), 0, dec("4.00"));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.line_total, dec("4.00"));

        item.quantity = -7;
        item.recalculate_line_total();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.line_total, dec("4.00"));
    }

    #[test]
    fn recalculo_do_total_e_idempotente() {
        let mut order = Order::new("Maria", None);
        order.add_item(OrderItem::new(Uuid::new_v4(), 4, dec("7.25")));

        order.recalculate_total();
        let first_pass = order.total_amount;
        order.recalculate_total();
        assert_eq!(order.total_amount, first_pass);
        assert_eq!(order.total_amount, dec("29.00"));
    }

    #[test]
    fn atualizar_quantidade_reflete_no_total() {
        let mut order = Order::new("Maria", None);
        order.add_item(OrderItem::new(Uuid::new_v4(), 2, dec("3.00")));
        assert_eq!(order.total_amount, dec("6.00"));

        order.items[0].quantity = 5;
        order.items[0].recalculate_line_total();
        order.recalculate_total();
        assert_eq!(order.total_amount, dec("15.00"));
    }

    #[test]
    fn remover_linha_inexistente_nao_altera_nada() {
        let mut order = Order::new("Maria", None);
        order.add_item(OrderItem::new(Uuid::new_v4(), 1, dec("9.90")));

        assert!(order.remove_item(Uuid::new_v4()).is_none());
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_amount, dec("9.90"));
    }

    #[test]
    fn filtro_de_status_de_envio_e_total() {
        assert_eq!(OrderShippingStatus::parse_filter("shipped"), Some(OrderShippingStatus::Shipped));
        assert_eq!(OrderShippingStatus::parse_filter("  Delivered  "), Some(OrderShippingStatus::Delivered));
        assert_eq!(OrderShippingStatus::parse_filter("PLACED"), Some(OrderShippingStatus::Placed));
        assert_eq!(OrderShippingStatus::parse_filter(""), None);
        assert_eq!(OrderShippingStatus::parse_filter("em_transito"), None);
    }
}
