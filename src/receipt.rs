//! Simulated fee payments and their receipts. No money moves anywhere: a
//! confirmed payment produces a `PaymentReceipt` for the in-session history
//! plus a plain-text receipt file in the data directory that can be opened
//! from the payments screen.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::models::{PaymentMethod, PaymentReceipt, StudentRecord};
use crate::store::snapshot::data_dir;

/// Semester fee shown on the payments screen. Display-only.
pub const FEE_AMOUNT: &str = "Rs. 45,000";

/// Subdirectory of the data dir where receipt files accumulate.
const RECEIPTS_DIR_NAME: &str = "receipts";

/// Build a receipt for a just-confirmed payment.
pub fn issue(amount: &str, method: PaymentMethod) -> PaymentReceipt {
    let now = Local::now();
    PaymentReceipt {
        id: receipt_id(&now),
        amount: amount.to_string(),
        method,
        paid_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Render the receipt to text and write it as `Receipt_<id>.txt` under the
/// receipts directory, returning the file path for the caller to open.
pub fn write_file(receipt: &PaymentReceipt, student: &StudentRecord) -> Result<PathBuf> {
    let dir = data_dir()?.join(RECEIPTS_DIR_NAME);
    fs::create_dir_all(&dir).context("failed to create receipts directory")?;

    let path = dir.join(format!("Receipt_{}.txt", receipt.id));
    fs::write(&path, render(receipt, student)).context("failed to write receipt file")?;
    Ok(path)
}

/// The flat key-value receipt document. Mirrors what the accounts office
/// would print: header, transaction info, student details, amount box.
fn render(receipt: &PaymentReceipt, student: &StudentRecord) -> String {
    let mut out = String::new();
    out.push_str("==============================================\n");
    out.push_str("          Official Hostel Fee Receipt\n");
    out.push_str("==============================================\n\n");
    out.push_str(&format!("Receipt ID:       {}\n", receipt.id));
    out.push_str(&format!("Transaction Time: {}\n", receipt.paid_at));
    out.push_str(&format!("Payment Method:   {}\n\n", receipt.method));
    out.push_str("Student Details\n");
    out.push_str("---------------\n");
    out.push_str(&format!("Name:         {}\n", student.name));
    out.push_str(&format!("Student ID:   {}\n", student.id));
    out.push_str(&format!(
        "Hostel/Room:  {} Hostel | Room {}\n\n",
        student.hostel, student.room
    ));
    out.push_str(&format!(
        "Amount Paid:  {} (Successfully Paid)\n\n",
        receipt.amount
    ));
    out.push_str("This is a computer-generated receipt.\n");
    out.push_str("Contact the accounts office for verification.\n");
    out
}

/// Eight upper-case base-36 characters derived from the transaction time.
/// Unique enough for a simulation without pulling in a randomness crate.
fn receipt_id(moment: &DateTime<Local>) -> String {
    let mut value = moment.timestamp_nanos_opt().unwrap_or_default() as u128;
    let digits = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut id = String::with_capacity(8);
    for _ in 0..8 {
        id.push(digits[(value % 36) as usize] as char);
        value /= 36;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hostel;

    fn sample_student() -> StudentRecord {
        StudentRecord {
            id: "S1001".to_string(),
            name: "Alok Sharma".to_string(),
            year: "1st".to_string(),
            room: "101A".to_string(),
            contact: "9876543210".to_string(),
            hostel: Hostel::Boys,
            parent: "Ramesh Sharma".to_string(),
            address: "123, Sector 15, Dwarka, New Delhi, India".to_string(),
        }
    }

    #[test]
    fn issued_receipts_carry_the_amount_and_method() {
        let receipt = issue(FEE_AMOUNT, PaymentMethod::Upi);
        assert_eq!(receipt.amount, FEE_AMOUNT);
        assert_eq!(receipt.method, PaymentMethod::Upi);
        assert_eq!(receipt.id.len(), 8);
        assert!(receipt.id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn rendered_receipt_names_the_student_and_amount() {
        let receipt = issue(FEE_AMOUNT, PaymentMethod::Card);
        let text = render(&receipt, &sample_student());
        assert!(text.contains("Alok Sharma"));
        assert!(text.contains("S1001"));
        assert!(text.contains(FEE_AMOUNT));
        assert!(text.contains(&receipt.id));
        assert!(text.contains("CARD"));
    }
}
