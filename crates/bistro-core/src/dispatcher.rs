//! # Order Dispatcher
//!
//! FIFO queue of orders waiting for the kitchen.
//!
//! ```text
//! create_order ──► [ o1 | o2 | o3 ] ──► pop_next_order
//!                  back          front
//! ```
//!
//! Orders stay editable while queued (`order_mut`, `add_to_order`); popping
//! hands ownership to the caller.

use std::collections::VecDeque;

use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::{MenuCatalog, MenuStorage};
use crate::error::ValidationError;
use crate::order::Order;
use crate::validation::ValidationResult;

/// Pending orders in creation order.
#[derive(Debug, Default)]
pub struct OrderDispatcher {
    queue: VecDeque<Order>,
}

impl OrderDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty order at the back of the queue.
    pub fn create_order(&mut self) -> &mut Order {
        let order = Order::new();
        info!(order_id = %order.id(), queued = self.queue.len() + 1, "Order created");
        self.queue.push_back(order);
        let last = self.queue.len() - 1;
        &mut self.queue[last]
    }

    /// A queued order, by id.
    pub fn order(&self, id: Uuid) -> Option<&Order> {
        self.queue.iter().find(|o| o.id() == id)
    }

    /// A queued order, by id, for editing.
    pub fn order_mut(&mut self, id: Uuid) -> Option<&mut Order> {
        self.queue.iter_mut().find(|o| o.id() == id)
    }

    /// Looks up `name` on the menu and adds it to a queued order.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown order id or menu item
    /// - `MustBePositive` for a non-positive quantity
    pub fn add_to_order<S: MenuStorage>(
        &mut self,
        order_id: Uuid,
        menu: &MenuCatalog<S>,
        name: &str,
        quantity: i64,
    ) -> ValidationResult<()> {
        let item = menu.line_item(name)?;
        let order = self
            .order_mut(order_id)
            .ok_or_else(|| ValidationError::not_found("order", order_id.to_string()))?;
        order.add_item(item, quantity)
    }

    /// Removes and returns the oldest order.
    pub fn pop_next_order(&mut self) -> Option<Order> {
        let order = self.queue.pop_front()?;
        debug!(order_id = %order.id(), remaining = self.queue.len(), "Order dispatched");
        Some(order)
    }

    /// Queued orders, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &Order> + '_ {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
