//! Budget categories with a running ledger, and a text bar chart of how
//! spending splits across categories.

use std::fmt;

use tracing::debug;

/// Width of the printed ledger.
const LEDGER_WIDTH: usize = 30;
/// Width of the description column in the printed ledger.
const DESCRIPTION_WIDTH: usize = 23;
/// Width of the amount column in the printed ledger.
const AMOUNT_WIDTH: usize = LEDGER_WIDTH - DESCRIPTION_WIDTH;

/// One ledger line. Deposits are positive, withdrawals negative.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerEntry {
    pub amount: f64,
    pub description: String,
}

/// A named budget category.
///
/// # Examples
/// ```
/// use u_drills::budget::Category;
///
/// let mut food = Category::new("Food");
/// let mut clothing = Category::new("Clothing");
/// food.deposit(1000.0, "deposit");
/// assert!(food.withdraw(10.15, "groceries"));
/// assert!(food.transfer(50.0, &mut clothing));
/// assert!(!clothing.withdraw(75.0, "coat"));
///
/// assert!((food.balance() - 939.85).abs() < 1e-9);
/// assert_eq!(clothing.ledger()[0].description, "Transfer from Food");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    name: String,
    ledger: Vec<LedgerEntry>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ledger: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in the order they were recorded.
    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    pub fn deposit(&mut self, amount: f64, description: &str) {
        self.ledger.push(LedgerEntry {
            amount,
            description: description.to_string(),
        });
    }

    /// Records a withdrawal if the balance covers it.
    ///
    /// Returns `false` (and records nothing) on insufficient funds.
    pub fn withdraw(&mut self, amount: f64, description: &str) -> bool {
        if !self.check_funds(amount) {
            debug!(category = %self.name, amount, balance = self.balance(), "withdrawal refused");
            return false;
        }
        self.ledger.push(LedgerEntry {
            amount: -amount,
            description: description.to_string(),
        });
        true
    }

    /// Sum of all ledger amounts.
    pub fn balance(&self) -> f64 {
        self.ledger.iter().map(|e| e.amount).sum()
    }

    /// True if `amount` does not exceed the balance.
    pub fn check_funds(&self, amount: f64) -> bool {
        amount <= self.balance()
    }

    /// Moves `amount` into `other`, recording "Transfer to ..." here and
    /// "Transfer from ..." there.
    ///
    /// Returns `false` (and records nothing) on insufficient funds.
    pub fn transfer(&mut self, amount: f64, other: &mut Category) -> bool {
        if !self.check_funds(amount) {
            debug!(from = %self.name, to = %other.name, amount, "transfer refused");
            return false;
        }
        self.withdraw(amount, &format!("Transfer to {}", other.name));
        other.deposit(amount, &format!("Transfer from {}", self.name));
        true
    }

    /// Total withdrawn, as a positive number. Outgoing transfers count.
    pub fn spent(&self) -> f64 {
        self.ledger
            .iter()
            .filter(|e| e.amount < 0.0)
            .map(|e| -e.amount)
            .sum()
    }
}

impl fmt::Display for Category {
    /// ```text
    /// *************Food*************
    /// deposit                 900.00
    /// milk, cereal, eggs, bac -45.67
    /// Total: 854.33
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:*^width$}", self.name, width = LEDGER_WIDTH)?;
        for entry in &self.ledger {
            let description: String = entry.description.chars().take(DESCRIPTION_WIDTH).collect();
            writeln!(
                f,
                "{description:<dw$}{:>aw$.2}",
                entry.amount,
                dw = DESCRIPTION_WIDTH,
                aw = AMOUNT_WIDTH
            )?;
        }
        write!(f, "Total: {:.2}", self.balance())
    }
}

/// Renders the share of total spending per category as a vertical bar
/// chart.
///
/// Each share is floored to a multiple of ten percent. Bars are drawn with
/// `o`, category names run vertically under the axis, and every row keeps
/// the trailing space of the last column. There is no trailing newline.
/// If nothing was spent at all, every category shows 0%.
pub fn spend_chart(categories: &[&Category]) -> String {
    let spent: Vec<f64> = categories.iter().map(|c| c.spent()).collect();
    let total: f64 = spent.iter().sum();
    let shares: Vec<u32> = spent
        .iter()
        .map(|&s| {
            if total == 0.0 {
                0
            } else {
                ((s / total * 100.0 / 10.0).floor() as u32) * 10
            }
        })
        .collect();

    let mut lines = vec!["Percentage spent by category".to_string()];

    for level in (0..=100).rev().step_by(10) {
        let mut line = format!("{level:>3}|");
        for &share in &shares {
            line.push_str(if share >= level { " o " } else { "   " });
        }
        line.push(' ');
        lines.push(line);
    }

    lines.push(format!("    {}", "-".repeat(3 * categories.len() + 1)));

    let names: Vec<Vec<char>> = categories.iter().map(|c| c.name.chars().collect()).collect();
    let tallest = names.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..tallest {
        let mut line = String::from("    ");
        for name in &names {
            match name.get(row) {
                Some(ch) => {
                    line.push(' ');
                    line.push(*ch);
                    line.push(' ');
                }
                None => line.push_str("   "),
            }
        }
        line.push(' ');
        lines.push(line);
    }

    lines.join("\n")
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn balance_never_negative_through_withdrawals(
            deposit in 0.0_f64..1000.0,
            withdrawals in proptest::collection::vec(0.0_f64..500.0, 0..20),
        ) {
            let mut c = Category::new("Test");
            c.deposit(deposit, "deposit");
            for w in withdrawals {
                c.withdraw(w, "w");
            }
            prop_assert!(c.balance() > -1e-9);
        }

        #[test]
        fn chart_shape(
            spends in proptest::collection::vec(0.0_f64..100.0, 1..5),
            names in proptest::collection::vec("[A-Z][a-z]{0,9}", 5),
        ) {
            let cats: Vec<Category> = spends
                .iter()
                .zip(&names)
                .map(|(&s, n)| {
                    let mut c = Category::new(n.as_str());
                    c.deposit(100.0, "deposit");
                    c.withdraw(s, "spend");
                    c
                })
                .collect();
            let refs: Vec<&Category> = cats.iter().collect();
            let chart = spend_chart(&refs);
            let width = 4 + 3 * cats.len() + 1;
            for line in chart.lines().skip(1) {
                prop_assert_eq!(line.chars().count(), width);
            }
            let tallest = cats.iter().map(|c| c.name().chars().count()).max().unwrap();
            prop_assert_eq!(chart.lines().count(), 1 + 11 + 1 + tallest);
        }
    }
}
