//! Order Validation
//!
//! This example validates an order with a small rule tree and then runs it
//! through a command.
//!
//! Key concepts:
//! - Successor groups that only run when their parent passes
//! - Associations that tell the caller which field failed
//! - Async checks for lookups
//! - Commands that refuse to run their action when a rule fails
//!
//! Run with: cargo run --example order_validation

use futures::future::BoxFuture;
use futures::FutureExt;
use rulechain::command::{ActionError, Command, DomainError};
use rulechain::core::{AsyncCheck, Check, Rule, Verdict};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
struct Order {
    customer: String,
    quantity: u32,
    unit_price: u32,
    coupon: Option<String>,
}

#[derive(Clone)]
struct Shop {
    known_customers: Arc<HashSet<String>>,
    stock: u32,
}

struct QuantityPositive(u32);

impl Check for QuantityPositive {
    fn check(&mut self, verdict: &mut Verdict) {
        if self.0 == 0 {
            verdict.invalidate_with("Quantity must be at least 1", "Quantity");
        }
    }
}

struct InStock {
    requested: u32,
    available: u32,
}

impl Check for InStock {
    fn check(&mut self, verdict: &mut Verdict) {
        if self.requested > self.available {
            verdict.invalidate_with(
                format!("Only {} left in stock", self.available),
                "Quantity",
            );
        }
    }
}

struct CustomerExists {
    customer: String,
    known: Arc<HashSet<String>>,
}

impl AsyncCheck for CustomerExists {
    fn check<'a>(&'a mut self, verdict: &'a mut Verdict) -> BoxFuture<'a, ()> {
        async move {
            // Stand-in for a database lookup.
            tokio::time::sleep(Duration::from_millis(5)).await;
            if !self.known.contains(&self.customer) {
                verdict.invalidate_with(format!("Unknown customer '{}'", self.customer), "Customer");
            }
        }
        .boxed()
    }
}

fn order_rules(order: &Order, shop: &Shop) -> Rule {
    let coupon = order.coupon.clone();
    Rule::new_async(CustomerExists {
        customer: order.customer.clone(),
        known: Arc::clone(&shop.known_customers),
    })
    .if_valid_then_validate([
        Rule::new(QuantityPositive(order.quantity))
            .if_valid_then_validate([Rule::new(InStock {
                requested: order.quantity,
                available: shop.stock,
            })])
            .expect("group is not empty"),
    ])
    .expect("group is not empty")
    .if_valid_then_validate([Rule::from_fn("CouponFormat", move || match &coupon {
        Some(code) if !code.starts_with("SAVE") => Err(rulechain::Failure::associated(
            "Coupon codes start with SAVE",
            "Coupon",
        )),
        _ => Ok(()),
    })])
    .expect("group is not empty")
    .on_failure(|rule| {
        println!(
            "  rule tree failed: {} ({})",
            rule.error_message().unwrap_or_default(),
            rule.association().unwrap_or("-")
        );
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Order Validation Example ===\n");

    let shop = Shop {
        known_customers: Arc::new(["ada".to_string(), "grace".to_string()].into_iter().collect()),
        stock: 10,
    };

    // Example 1: a rule tree on its own
    println!("Example 1: Rule tree");
    let order = Order {
        customer: "ada".to_string(),
        quantity: 12,
        unit_price: 3,
        coupon: None,
    };
    let mut rule = order_rules(&order, &shop);
    rule.execute_async().await;
    println!("  valid: {}\n", rule.is_valid());

    // Example 2: the same rules guarding a command
    println!("Example 2: Command");
    let command = Command::<u32, (Order, Shop)>::builder()
        .rule(|(order, shop): &(Order, Shop)| order_rules(order, shop))
        .action_fn(|(order, _): &(Order, Shop)| {
            if order.customer == "grace" && order.quantity > 5 {
                return Err(ActionError::Domain(DomainError::new(
                    "Bulk orders need a manual review",
                )));
            }
            Ok(order.quantity * order.unit_price)
        })
        .build()
        .expect("action is set");

    let orders = [
        Order {
            customer: "ada".to_string(),
            quantity: 2,
            unit_price: 3,
            coupon: Some("SAVE10".to_string()),
        },
        Order {
            customer: "linus".to_string(),
            quantity: 1,
            unit_price: 3,
            coupon: None,
        },
        Order {
            customer: "grace".to_string(),
            quantity: 8,
            unit_price: 3,
            coupon: Some("FREE".to_string()),
        },
        Order {
            customer: "grace".to_string(),
            quantity: 8,
            unit_price: 3,
            coupon: None,
        },
    ];

    for order in orders {
        let customer = order.customer.clone();
        match command.execute_async(&(order, shop.clone())).await {
            Ok(result) if result.success => {
                println!("  {customer}: charged {}", result.value.unwrap_or_default())
            }
            Ok(result) => {
                for error in &result.errors {
                    println!("  {customer}: rejected, {error}");
                }
            }
            Err(err) => println!("  {customer}: {err}"),
        }
    }

    println!("\n=== Example Complete ===");
}
