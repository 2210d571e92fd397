//! Scripted demonstration of the arithmetic core

use deskcalc::core::{format_value, CalcResult, Calculator, Operation};

use crate::output::Reporter;

/// One printed element of the demonstration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoStep {
    /// Opening title
    Title(String),
    /// Section heading
    Section(String),
    /// A line of results
    Line(String),
    /// A caught error
    Error(String),
}

fn show(result: CalcResult<f64>) -> String {
    match result {
        Ok(value) => format_value(value),
        Err(e) => format!("Error: {e}"),
    }
}

fn equation(calc: &mut Calculator, a: f64, op: Operation, b: f64) -> DemoStep {
    let result = show(calc.calculate(a, b, op));
    DemoStep::Line(format!(
        "{} {} {} = {result}",
        format_value(a),
        op.symbol(),
        format_value(b)
    ))
}

/// Runs the demonstration against a fresh calculator
#[must_use]
pub fn steps() -> Vec<DemoStep> {
    let mut calc = Calculator::new();
    let mut steps = vec![DemoStep::Title("deskcalc demo".to_string())];

    steps.push(DemoStep::Section("Basic operations:".to_string()));
    steps.push(equation(&mut calc, 5.0, Operation::Add, 3.0));
    steps.push(equation(&mut calc, 10.0, Operation::Subtract, 4.0));
    steps.push(equation(&mut calc, 7.0, Operation::Multiply, 6.0));
    steps.push(equation(&mut calc, 20.0, Operation::Divide, 4.0));
    steps.push(equation(&mut calc, 2.0, Operation::Power, 8.0));

    steps.push(DemoStep::Section("Chained calculation:".to_string()));
    steps.push(equation(&mut calc, 100.0, Operation::Add, 50.0));
    let doubled = calc.multiply(calc.last_result(), 2.0);
    steps.push(DemoStep::Line(format!(
        "previous result × 2 = {}",
        format_value(doubled)
    )));
    let reduced = calc.subtract(calc.last_result(), 100.0);
    steps.push(DemoStep::Line(format!(
        "previous result − 100 = {}",
        format_value(reduced)
    )));

    steps.push(DemoStep::Section("Memory:".to_string()));
    steps.push(equation(&mut calc, 123.0, Operation::Add, 456.0));
    calc.memory_store();
    steps.push(DemoStep::Line("→ stored in memory".to_string()));
    steps.push(equation(&mut calc, 10.0, Operation::Multiply, 20.0));
    steps.push(DemoStep::Line(format!(
        "memory recall: {}",
        format_value(calc.memory_recall())
    )));

    steps.push(DemoStep::Section("Decimals:".to_string()));
    #[allow(clippy::approx_constant)]
    steps.push(equation(&mut calc, 3.14, Operation::Multiply, 2.0));
    steps.push(equation(&mut calc, 10.5, Operation::Divide, 2.5));

    steps.push(DemoStep::Section("Division by zero:".to_string()));
    match calc.divide(10.0, 0.0) {
        Ok(value) => steps.push(DemoStep::Line(format!("10 ÷ 0 = {}", format_value(value)))),
        Err(e) => steps.push(DemoStep::Error(format!("Error: {e}"))),
    }

    steps.push(DemoStep::Section("Demo finished.".to_string()));
    steps
}

/// Prints the demonstration
pub fn run(reporter: &Reporter) {
    tracing::info!("running demo");
    for step in steps() {
        match step {
            DemoStep::Title(text) => reporter.header(&text),
            DemoStep::Section(text) => reporter.section(&text),
            DemoStep::Line(text) => reporter.line(&text),
            DemoStep::Error(text) => reporter.error_line(&text),
        }
    }
}
