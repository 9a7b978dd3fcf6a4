//! Vertical arrangement of addition and subtraction problems.
//!
//! Problems like `"32 + 698"` are laid out the way they are written on
//! paper: operands right-aligned, operator on the second line, a dash rule
//! underneath, and optionally the result.
//!
//! ```text
//!    32      3801      45      123
//! + 698    -    2    + 43    +  49
//! -----    ------    ----    -----
//!   730      3799      88      172
//! ```

/// Most problems accepted in one call.
pub const MAX_PROBLEMS: usize = 5;
/// Most digits allowed in an operand.
pub const MAX_DIGITS: usize = 4;

const COLUMN_GAP: &str = "    ";

/// Reasons a list of problems can't be arranged.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrangeError {
    TooManyProblems,
    InvalidOperator,
    NonDigit,
    TooManyDigits,
    /// The problem is not of the form `<a> <op> <b>`.
    Malformed(String),
}

impl std::fmt::Display for ArrangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArrangeError::TooManyProblems => write!(f, "Error: Too many problems."),
            ArrangeError::InvalidOperator => write!(f, "Error: Operator must be '+' or '-'."),
            ArrangeError::NonDigit => write!(f, "Error: Numbers must only contain digits."),
            ArrangeError::TooManyDigits => {
                write!(f, "Error: Numbers cannot be more than four digits.")
            }
            ArrangeError::Malformed(problem) => {
                write!(f, "Error: Problem '{problem}' must look like 'a + b'.")
            }
        }
    }
}

impl std::error::Error for ArrangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Sub,
}

impl Operator {
    fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
        }
    }

    fn apply(self, a: i64, b: i64) -> i64 {
        match self {
            Operator::Add => a + b,
            Operator::Sub => a - b,
        }
    }
}

/// One validated problem.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Problem<'a> {
    top: &'a str,
    op: Operator,
    bottom: &'a str,
}

impl<'a> Problem<'a> {
    /// Checks, in order: shape, digits, operator, operand length.
    fn parse(text: &'a str) -> Result<Self, ArrangeError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let [top, op, bottom] = parts[..] else {
            return Err(ArrangeError::Malformed(text.to_string()));
        };

        let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_number(top) || !is_number(bottom) {
            return Err(ArrangeError::NonDigit);
        }

        let op = match op {
            "+" => Operator::Add,
            "-" => Operator::Sub,
            _ => return Err(ArrangeError::InvalidOperator),
        };

        if top.len() > MAX_DIGITS || bottom.len() > MAX_DIGITS {
            return Err(ArrangeError::TooManyDigits);
        }

        Ok(Self { top, op, bottom })
    }

    /// Column width: the longer operand plus room for the operator and a space.
    fn width(&self) -> usize {
        self.top.len().max(self.bottom.len()) + 2
    }

    fn answer(&self) -> i64 {
        let value = |s: &str| s.bytes().fold(0_i64, |acc, b| acc * 10 + i64::from(b - b'0'));
        self.op.apply(value(self.top), value(self.bottom))
    }
}

fn join_row<F>(problems: &[Problem<'_>], cell: F) -> String
where
    F: Fn(&Problem<'_>) -> String,
{
    problems.iter().map(cell).collect::<Vec<_>>().join(COLUMN_GAP)
}

/// Arranges up to five problems side by side.
///
/// Each problem is `"<a> <op> <b>"` where `op` is `+` or `-` and both
/// operands are decimal numbers of at most four digits. Rows are separated
/// by `\n` with no trailing newline; columns are separated by four spaces.
///
/// # Errors
/// The whole call fails on the first problem that breaks a rule; see
/// [`ArrangeError`].
///
/// # Examples
/// ```
/// use u_drills::arithmetic::arrange;
/// let out = arrange(&["3801 - 2", "123 + 49"], true).unwrap();
/// assert_eq!(
///     out,
///     "  3801      123\n\
///      -    2    +  49\n\
///      ------    -----\n\
///      \x20 3799      172"
/// );
/// ```
pub fn arrange(problems: &[&str], show_answers: bool) -> Result<String, ArrangeError> {
    if problems.len() > MAX_PROBLEMS {
        return Err(ArrangeError::TooManyProblems);
    }

    let problems = problems
        .iter()
        .map(|p| Problem::parse(p))
        .collect::<Result<Vec<_>, _>>()?;

    let mut lines = vec![
        join_row(&problems, |p| format!("{:>w$}", p.top, w = p.width())),
        join_row(&problems, |p| {
            format!("{}{:>w$}", p.op.symbol(), p.bottom, w = p.width() - 1)
        }),
        join_row(&problems, |p| "-".repeat(p.width())),
    ];
    if show_answers {
        lines.push(join_row(&problems, |p| {
            format!("{:>w$}", p.answer(), w = p.width())
        }));
    }

    Ok(lines.join("\n"))
}

// ============================================================================
// Tests
// ============================================================================
