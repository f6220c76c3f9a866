// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use bookstore_domain::money::{line_total, validate_positive};
use bookstore_domain::{
    BookStatus, DomainError, PurchaseOrderStatus, SaleStatus, TransactionCategory,
    TransactionType, validate_quantity,
};
use rust_decimal::Decimal;

use crate::command::{Command, SaleLine};
use crate::error::CoreError;
use crate::state::{
    BookSnapshot, LedgerDraft, LedgerReference, SaleDraft, StatusChange, TransitionResult,
};

/// Applies a command to a book, producing the stock, status and ledger
/// effects it implies.
///
/// This function is pure: it reads the snapshots it is given and returns
/// what should be written. Nothing is persisted here.
///
/// # Arguments
///
/// * `book` - The current state of the book the command acts on
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` describing every row change
/// * `Err(CoreError)` if the command is invalid for the current state
///
/// # Errors
///
/// Returns an error if:
/// - A stock adjustment is zero or would leave stock negative
/// - An order or sale is not in a status that permits the transition
/// - An order or sale belongs to a different book
/// - A sale asks for an unavailable book or more copies than are in stock
/// - An amount is out of range
#[allow(clippy::too_many_lines)]
pub fn apply(book: &BookSnapshot, command: Command) -> Result<TransitionResult, CoreError> {
    let action: &'static str = command.name();

    match command {
        Command::AdjustStock { delta } => {
            if delta == 0 {
                return Err(DomainError::InvalidStockAdjustment {
                    reason: String::from("quantity must not be zero"),
                }
                .into());
            }

            let new_stock: i64 = checked_stock(book.stock, delta)?;
            if new_stock < 0 {
                return Err(DomainError::InvalidStockAdjustment {
                    reason: format!(
                        "adjusting stock {} by {delta} would leave {new_stock} copies",
                        book.stock
                    ),
                }
                .into());
            }

            Ok(TransitionResult {
                action,
                details: format!(
                    "Adjusted stock of book {} by {delta} ({} -> {new_stock})",
                    book.book_id, book.stock
                ),
                ..book_only(book, new_stock, BookStatus::derive(book.status, new_stock))
            })
        }
        Command::ChangeStatus { status } => {
            BookStatus::validate_change(status, book.stock)?;

            Ok(TransitionResult {
                action,
                details: format!(
                    "Changed status of book {} from {} to {status}",
                    book.book_id, book.status
                ),
                ..book_only(book, book.stock, status)
            })
        }
        Command::PayPurchaseOrder { order } => {
            ensure_same_book(book, order.book_id)?;
            order
                .status
                .validate_transition(PurchaseOrderStatus::Paid)?;

            Ok(TransitionResult {
                action,
                details: format!(
                    "Paid purchase order {} for book {} ({})",
                    order.order_id, book.book_id, order.total_amount
                ),
                purchase_order: Some(StatusChange {
                    id: order.order_id,
                    from: order.status,
                    to: PurchaseOrderStatus::Paid,
                }),
                ledger: Some(LedgerDraft {
                    transaction_type: TransactionType::Expense,
                    category: TransactionCategory::Purchase,
                    amount: order.total_amount,
                    description: format!(
                        "Payment for purchase order {}: {} copies of book {}",
                        order.order_id, order.quantity, book.book_id
                    ),
                    reference: LedgerReference::PurchaseOrder(order.order_id),
                }),
                ..book_only(book, book.stock, book.status)
            })
        }
        Command::ShelvePurchaseOrder { order } => {
            ensure_same_book(book, order.book_id)?;
            order
                .status
                .validate_transition(PurchaseOrderStatus::Shelved)?;

            let new_stock: i64 = checked_stock(book.stock, order.quantity)?;

            Ok(TransitionResult {
                action,
                details: format!(
                    "Shelved purchase order {}: book {} stock {} -> {new_stock}",
                    order.order_id, book.book_id, book.stock
                ),
                purchase_order: Some(StatusChange {
                    id: order.order_id,
                    from: order.status,
                    to: PurchaseOrderStatus::Shelved,
                }),
                ..book_only(book, new_stock, BookStatus::derive(book.status, new_stock))
            })
        }
        Command::ReturnPurchaseOrder { order } => {
            ensure_same_book(book, order.book_id)?;
            order
                .status
                .validate_transition(PurchaseOrderStatus::Returned)?;

            Ok(TransitionResult {
                action,
                details: format!("Returned purchase order {} to supplier", order.order_id),
                purchase_order: Some(StatusChange {
                    id: order.order_id,
                    from: order.status,
                    to: PurchaseOrderStatus::Returned,
                }),
                ..book_only(book, book.stock, book.status)
            })
        }
        Command::RecordSale {
            quantity,
            unit_price,
            customer,
            notes,
        } => {
            validate_quantity("quantity", quantity)?;

            if !book.status.is_sellable() {
                return Err(DomainError::BookNotAvailable {
                    book_id: book.book_id,
                    status: book.status.as_str().to_string(),
                }
                .into());
            }
            if quantity > book.stock {
                return Err(DomainError::InsufficientStock {
                    book_id: book.book_id,
                    requested: quantity,
                    available: book.stock,
                }
                .into());
            }

            let unit_price: Decimal =
                validate_positive("unit_price", unit_price.unwrap_or(book.price))?;
            let total_amount: Decimal = line_total(quantity, unit_price)?;
            let new_stock: i64 = book.stock - quantity;

            Ok(TransitionResult {
                action,
                details: format!(
                    "Sold {quantity} copies of book {} at {unit_price} (stock {} -> {new_stock})",
                    book.book_id, book.stock
                ),
                new_sale: Some(SaleDraft {
                    book_id: book.book_id,
                    quantity,
                    unit_price,
                    total_amount,
                    customer,
                    notes,
                }),
                ledger: Some(LedgerDraft {
                    transaction_type: TransactionType::Income,
                    category: TransactionCategory::Sale,
                    amount: total_amount,
                    description: format!(
                        "Sale of {quantity} copies of book {} at {unit_price}",
                        book.book_id
                    ),
                    reference: LedgerReference::NewSale,
                }),
                ..book_only(book, new_stock, BookStatus::derive(book.status, new_stock))
            })
        }
        Command::ReturnSale { sale } => {
            ensure_same_book(book, sale.book_id)?;
            sale.status.validate_transition(SaleStatus::Returned)?;

            let new_stock: i64 = checked_stock(book.stock, sale.quantity)?;

            Ok(TransitionResult {
                action,
                details: format!(
                    "Returned sale {}: book {} stock {} -> {new_stock}, refunded {}",
                    sale.sale_id, book.book_id, book.stock, sale.total_amount
                ),
                sale: Some(StatusChange {
                    id: sale.sale_id,
                    from: sale.status,
                    to: SaleStatus::Returned,
                }),
                ledger: Some(LedgerDraft {
                    transaction_type: TransactionType::Expense,
                    category: TransactionCategory::Refund,
                    amount: sale.total_amount,
                    description: format!(
                        "Refund for sale {}: {} copies of book {}",
                        sale.sale_id, sale.quantity, book.book_id
                    ),
                    reference: LedgerReference::Sale(sale.sale_id),
                }),
                ..book_only(book, new_stock, BookStatus::derive(book.status, new_stock))
            })
        }
    }
}

/// Applies a multi-book sale line by line.
///
/// Lines naming the same book see the stock left by earlier lines, so a
/// batch cannot oversell a book by splitting the quantity across lines.
///
/// # Arguments
///
/// * `books` - Snapshots of every book the lines reference
/// * `lines` - The sale lines, in order
/// * `customer` - Customer recorded on every resulting sale
/// * `notes` - Notes recorded on every resulting sale
///
/// # Errors
///
/// Returns an error if the batch is empty, a line names a book with no
/// snapshot, or any line fails `apply`. No partial result is returned.
pub fn apply_sale_batch(
    books: &[BookSnapshot],
    lines: &[SaleLine],
    customer: Option<&str>,
    notes: Option<&str>,
) -> Result<Vec<TransitionResult>, CoreError> {
    if lines.is_empty() {
        return Err(CoreError::EmptyBatch);
    }

    let mut current: HashMap<i64, BookSnapshot> = books
        .iter()
        .map(|book| (book.book_id, book.clone()))
        .collect();
    let mut results: Vec<TransitionResult> = Vec::with_capacity(lines.len());

    for line in lines {
        let book: &BookSnapshot = current
            .get(&line.book_id)
            .ok_or(CoreError::MissingSnapshot(line.book_id))?;

        let result: TransitionResult = apply(
            book,
            Command::RecordSale {
                quantity: line.quantity,
                unit_price: line.unit_price,
                customer: customer.map(str::to_string),
                notes: notes.map(str::to_string),
            },
        )?;

        let after: BookSnapshot = result.book_after(book);
        current.insert(line.book_id, after);
        results.push(result);
    }

    Ok(results)
}

fn book_only(book: &BookSnapshot, new_stock: i64, new_status: BookStatus) -> TransitionResult {
    TransitionResult {
        action: "",
        details: String::new(),
        book_id: book.book_id,
        previous_stock: book.stock,
        new_stock,
        previous_status: book.status,
        new_status,
        purchase_order: None,
        sale: None,
        new_sale: None,
        ledger: None,
    }
}

const fn ensure_same_book(book: &BookSnapshot, referenced: i64) -> Result<(), CoreError> {
    if book.book_id == referenced {
        Ok(())
    } else {
        Err(CoreError::BookMismatch {
            expected: book.book_id,
            actual: referenced,
        })
    }
}

fn checked_stock(stock: i64, delta: i64) -> Result<i64, CoreError> {
    stock.checked_add(delta).ok_or_else(|| {
        CoreError::DomainViolation(DomainError::InvalidStockAdjustment {
            reason: format!("stock {stock} + {delta} overflows"),
        })
    })
}
