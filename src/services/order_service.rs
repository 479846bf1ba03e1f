// src/services/order_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrderRepository, ProductRepository},
    models::{
        admin::{Page, PageParams},
        order::{NewOrderLine, Order, OrderItem, OrderShippingStatus},
    },
};

// Toda mutação de linha passa pelo agregado: trava o pedido, reescreve a
// linha, recomputa o total e grava tudo na mesma transação. Assim nenhum
// leitor enxerga um total defasado em relação às linhas.
#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    product_repo: ProductRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(order_repo: OrderRepository, product_repo: ProductRepository, pool: PgPool) -> Self {
        Self { order_repo, product_repo, pool }
    }

    pub async fn create_order(
        &self,
        customer_name: &str,
        customer_email: Option<&str>,
        lines: &[NewOrderLine],
    ) -> Result<Order, AppError> {
        // 1. Monta o agregado em memória, congelando o preço de catálogo de
        //    cada linha antes de abrir a transação
        let mut order = Order::new(customer_name, customer_email);
        for line in lines {
            let product = self
                .product_repo
                .find_by_id(line.product_id)
                .await?
                .ok_or(AppError::ProductNotFound)?;
            order.add_item(OrderItem::new(product.id, line.quantity, product.price));
        }

        // 2. Persiste o pedido e as linhas numa única transação
        let mut tx = self.pool.begin().await?;

        let persisted = self.order_repo.create(&mut *tx, &order).await?;
        for item in &order.items {
            self.order_repo.insert_item(&mut *tx, item).await?;
        }

        tx.commit().await?;

        Ok(Order { items: order.items, ..persisted })
    }

    pub async fn add_item(
        &self,
        order_id: Uuid,
        line: &NewOrderLine,
    ) -> Result<Order, AppError> {
        // O preço vem sempre do catálogo no momento da criação da linha
        let product = self
            .product_repo
            .find_by_id(line.product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let mut tx = self.pool.begin().await?;

        // 1. Trava o pedido e carrega o agregado completo
        let mut order = self
            .order_repo
            .find_by_id_for_update(&mut *tx, order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;
        order.items = self.order_repo.find_items(&mut *tx, order_id).await?;

        // 2. Anexa a linha nova (o agregado recomputa o total)
        let mut item = OrderItem::new(product.id, line.quantity, product.price);
        item.order_id = order.id;
        self.order_repo.insert_item(&mut *tx, &item).await?;
        order.add_item(item);

        // 3. O total gravado é o recém-derivado pelo agregado
        self.order_repo
            .update_total(&mut *tx, order.id, order.total_amount)
            .await?;

        tx.commit().await?;
        Ok(order)
    }

    pub async fn update_item_quantity(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut order = self
            .order_repo
            .find_by_id_for_update(&mut *tx, order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;
        order.items = self.order_repo.find_items(&mut *tx, order_id).await?;

        // A linha precisa pertencer a este pedido
        let item = order
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(AppError::OrderItemNotFound)?;

        item.quantity = quantity;
        item.recalculate_line_total();
        let updated = item.clone();

        order.recalculate_total();

        self.order_repo.update_item(&mut *tx, &updated).await?;
        self.order_repo
            .update_total(&mut *tx, order.id, order.total_amount)
            .await?;

        tx.commit().await?;
        Ok(order)
    }

    pub async fn remove_item(&self, order_id: Uuid, item_id: Uuid) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut order = self
            .order_repo
            .find_by_id_for_update(&mut *tx, order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;
        order.items = self.order_repo.find_items(&mut *tx, order_id).await?;

        let removed = order
            .remove_item(item_id)
            .ok_or(AppError::OrderItemNotFound)?;

        self.order_repo.delete_item(&mut *tx, removed.id).await?;
        self.order_repo
            .update_total(&mut *tx, order.id, order.total_amount)
            .await?;

        tx.commit().await?;
        Ok(order)
    }

    // O modelo não impõe progressão só para frente (PLACED -> SHIPPED ->
    // DELIVERED); o painel pode reatribuir livremente entre os três valores.
    pub async fn set_shipping_status(
        &self,
        order_id: Uuid,
        status: OrderShippingStatus,
    ) -> Result<Order, AppError> {
        self.order_repo
            .update_shipping_status(&self.pool, order_id, status)
            .await?
            .ok_or(AppError::OrderNotFound)
    }

    pub async fn set_paid(&self, order_id: Uuid, paid: bool) -> Result<Order, AppError> {
        self.order_repo
            .update_paid(&self.pool, order_id, paid)
            .await?
            .ok_or(AppError::OrderNotFound)
    }

    pub async fn get_order(&self, order_id: Uuid) -> Result<Order, AppError> {
        let mut order = self
            .order_repo
            .find_by_id(&self.pool, order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;
        order.items = self.order_repo.find_items(&self.pool, order_id).await?;
        Ok(order)
    }

    // Página de pedidos do painel (filtros já parseados pela fachada)
    pub async fn list_orders(
        &self,
        shipping: Option<OrderShippingStatus>,
        paid: Option<bool>,
        params: &PageParams,
    ) -> Result<Page<Order>, AppError> {
        let content = self
            .order_repo
            .find_page(&self.pool, shipping, paid, params.size, params.offset())
            .await?;
        let total = self.order_repo.count(&self.pool, shipping, paid).await?;
        Ok(Page::new(content, params, total))
    }
}
