//! Terminal presentation of toasts and form outcomes.

use anyhow::bail;
use colored::{ColoredString, Colorize};
use gobarber_core::forms::SubmitOutcome;
use gobarber_core::{AppContext, FieldErrors, ToastKind, ToastMessage};

fn paint(kind: ToastKind, text: &str) -> ColoredString {
    match kind {
        ToastKind::Success => text.green(),
        ToastKind::Error => text.red(),
        ToastKind::Info => text.cyan(),
    }
}

/// Prints one toast. Errors go to stderr.
pub fn print_toast(toast: &ToastMessage) {
    let title = format!("{} {}", toast.kind.icon(), toast.title);
    let mut text = format!("{}", paint(toast.kind, &title).bold());
    if let Some(description) = &toast.description {
        text.push_str(&format!("\n  {}", description));
    }

    if toast.kind == ToastKind::Error {
        eprintln!("{}", text);
    } else {
        println!("{}", text);
    }
}

/// Prints and dismisses every queued toast.
pub fn flush_toasts(context: &AppContext) {
    for toast in context.toasts().drain() {
        print_toast(&toast);
    }
}

fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors {
        eprintln!("  {} {}", format!("{}:", field).bold(), message.red());
    }
}

/// Prints the outcome of a form and turns failures into an error.
pub fn report(context: &AppContext, outcome: SubmitOutcome) -> anyhow::Result<()> {
    flush_toasts(context);

    match outcome {
        SubmitOutcome::Redirect(_) | SubmitOutcome::Done => Ok(()),
        SubmitOutcome::Invalid(errors) => {
            eprintln!("{}", "Dados inválidos:".red().bold());
            print_field_errors(&errors);
            bail!("invalid input")
        }
        SubmitOutcome::Failed => bail!("request failed"),
        SubmitOutcome::Busy => bail!("another request is in progress"),
    }
}
