//! Calculator tool for basic two-operand arithmetic.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use tracing::info;

use crate::error::ToolError;
use crate::schema::{ParamKind, ParamSpec, ToolSchema};
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// One of the four supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Apply the operation. Only a zero divisor is rejected.
    pub fn apply(&self, operand1: f64, operand2: f64) -> Result<f64, ToolError> {
        match self {
            Operation::Add => Ok(operand1 + operand2),
            Operation::Subtract => Ok(operand1 - operand2),
            Operation::Multiply => Ok(operand1 * operand2),
            Operation::Divide if operand2 == 0.0 => Err(ToolError::DivisionByZero),
            Operation::Divide => Ok(operand1 / operand2),
        }
    }
}

impl FromStr for Operation {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ToolError::InvalidOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute `operand1 <operation> operand2`.
///
/// Fails with [`ToolError::InvalidOperation`] for names other than
/// add/subtract/multiply/divide and with [`ToolError::DivisionByZero`] when
/// dividing by zero. Non-finite operands pass through.
pub fn calculate(operand1: f64, operand2: f64, operation: &str) -> Result<f64, ToolError> {
    info!("Calculating {} {} {}", operand1, operation, operand2);
    let op: Operation = operation.parse()?;
    op.apply(operand1, operand2)
}

/// Calculator tool exposing [`calculate`].
///
/// # Parameters
///
/// - `operand1` (required): First number.
/// - `operand2` (required): Second number.
/// - `operation` (required): One of `add`, `subtract`, `multiply`, `divide`.
///
/// # Examples
///
/// ```json
/// {"operand1": 6, "operand2": 7, "operation": "multiply"}
/// {"operand1": 1, "operand2": 4, "operation": "divide"}
/// ```
pub struct Calculator;

impl Calculator {
    /// Create a new calculator tool.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for Calculator {
    fn name(&self) -> &str {
        "simple_calculator"
    }

    fn description(&self) -> &str {
        "Perform basic arithmetic operations: add, subtract, multiply, divide."
    }

    fn parameters(&self) -> ToolSchema {
        ToolSchema::new()
            .param(ParamSpec::required(
                "operand1",
                ParamKind::Number,
                "First number for the operation",
            ))
            .param(ParamSpec::required(
                "operand2",
                ParamKind::Number,
                "Second number for the operation",
            ))
            .param(
                ParamSpec::required(
                    "operation",
                    ParamKind::String,
                    "Operation to perform (add/subtract/multiply/divide)",
                )
                .with_choices(Operation::ALL.iter().map(|op| op.as_str())),
            )
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let operand1 = args.get_f64("operand1")?;
        let operand2 = args.get_f64("operand2")?;
        let operation = args.get_string("operation")?;

        let result = calculate(operand1, operand2, &operation)?;
        Ok(ToolOutput::number(result))
    }
}
