use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use tracing::{info, warn};

use super::app::{App, InputMode, PendingAction, Screen};
use crate::export;
use crate::models::{parse_budget_entry, Budgets, TransactionDraft, EXPENSE_CATEGORIES};
use crate::store::AppState;
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut AppState) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FinTrack", cmd_quit, r);
    register_command!("quit", "Quit FinTrack", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("ai", "Go to Insights", cmd_ai, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add expense 12.50 food 2024-01-15 lunch)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add transaction (e.g. :a income 3000 salary)",
        cmd_add,
        r
    );
    register_command!(
        "edit",
        "Edit selected transaction (e.g. :edit expense 14 food)",
        cmd_edit,
        r
    );
    register_command!("e", "Edit selected transaction", cmd_edit, r);
    register_command!(
        "delete",
        "Delete selected transaction, or :delete <id>",
        cmd_delete,
        r
    );
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget food 400, blank clears)",
        cmd_budget,
        r
    );
    register_command!(
        "clear-budgets",
        "Remove every budget",
        cmd_clear_budgets,
        r
    );
    register_command!("insights", "Ask for AI spending insights", cmd_insights, r);
    register_command!("i", "Ask for AI spending insights", cmd_insights, r);
    register_command!(
        "cancel-insights",
        "Cancel the running insights request",
        cmd_cancel_insights,
        r
    );
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/money.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, state: &mut AppState) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, state)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _state: &mut AppState) -> anyhow::Result<()> {
    app.insights.cancel();
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _state: &mut AppState) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _state: &mut AppState) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _state: &mut AppState) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_ai(_args: &str, app: &mut App, _state: &mut AppState) -> anyhow::Result<()> {
    app.screen = Screen::Insights;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _state: &mut AppState) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, state: &mut AppState) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add <income|expense> <amount> <category> [YYYY-MM-DD] [notes]");
        return Ok(());
    }

    let draft = TransactionDraft::parse_args(args, app.today);
    match draft.validate() {
        Ok(new) => {
            let txn = state.add_transaction(new);
            app.refresh(state);
            app.transaction_index = 0;
            app.transaction_scroll = 0;
            app.set_status(format!(
                "Added {} {} ({})",
                txn.kind,
                format_amount(txn.amount),
                crate::models::display_label(&txn.category)
            ));
        }
        Err(e) => app.set_status(format!("Not added: {e}")),
    }
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, state: &mut AppState) -> anyhow::Result<()> {
    let Some(selected) = app.selected_transaction().cloned() else {
        app.set_status("No transaction selected");
        return Ok(());
    };

    if args.is_empty() {
        // Open the editor pre-filled with the current values.
        app.screen = Screen::Transactions;
        app.editing_id = Some(selected.id.clone());
        app.command_input = TransactionDraft::from_transaction(&selected).to_args();
        app.input_mode = InputMode::Editing;
        return Ok(());
    }

    apply_edit(&selected.id, args, app, state);
    Ok(())
}

/// Validate `args` as a full transaction and store it under `id`.
pub(crate) fn apply_edit(id: &str, args: &str, app: &mut App, state: &mut AppState) {
    let draft = TransactionDraft::parse_args(args, app.today);
    match draft.validate() {
        Ok(new) => {
            if state.update_transaction(new.with_id(id.to_string())) {
                app.refresh(state);
                app.set_status("Transaction updated");
            } else {
                app.set_status(format!("No transaction with id {id}"));
            }
        }
        Err(e) => app.set_status(format!("Not saved: {e}")),
    }
}

fn cmd_delete(args: &str, app: &mut App, _state: &mut AppState) -> anyhow::Result<()> {
    let target = if args.is_empty() {
        app.selected_transaction().cloned()
    } else {
        app.transactions.iter().find(|t| t.id == args).cloned()
    };

    let Some(txn) = target else {
        if args.is_empty() {
            app.set_status("No transaction selected");
        } else {
            app.set_status(format!("No transaction with id {args}"));
        }
        return Ok(());
    };

    let summary = format!(
        "{} {} on {}",
        crate::models::display_label(&txn.category),
        format_amount(txn.amount),
        txn.date
    );
    app.ask_confirm(
        PendingAction::DeleteTransaction {
            id: txn.id.clone(),
            summary: summary.clone(),
        },
        format!("Delete {summary}?"),
    );
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, state: &mut AppState) -> anyhow::Result<()> {
    if args.is_empty() {
        let names: Vec<&str> = EXPENSE_CATEGORIES.iter().map(|c| c.value).collect();
        app.set_status(format!(
            "Usage: :budget <category> [amount]. Categories: {}",
            names.join(", ")
        ));
        return Ok(());
    }

    let mut parts = args.splitn(2, ' ');
    let category = parts.next().unwrap_or("");
    let limit = parts.next().unwrap_or("");

    match parse_budget_entry(category, limit) {
        Ok((category, limit)) => {
            let next = state.budgets().with_limit(category, limit);
            state.set_budgets(next);
            app.refresh(state);
            if limit.is_zero() {
                app.set_status(format!(
                    "Budget cleared for {}",
                    crate::models::display_label(category)
                ));
            } else {
                app.set_status(format!(
                    "Budget set: {} = {} per month",
                    crate::models::display_label(category),
                    format_amount(limit)
                ));
            }
        }
        Err(e) => app.set_status(format!("Budget not saved: {e}")),
    }
    Ok(())
}

fn cmd_clear_budgets(_args: &str, app: &mut App, state: &mut AppState) -> anyhow::Result<()> {
    if state.budgets().is_empty() {
        app.set_status("No budgets to clear");
        return Ok(());
    }
    app.ask_confirm(PendingAction::ClearBudgets, "Remove every budget?");
    Ok(())
}

fn cmd_insights(_args: &str, app: &mut App, state: &mut AppState) -> anyhow::Result<()> {
    let superseded = app.insights.is_pending();
    let id = app.insights.request(state.transactions().to_vec());
    info!(id, "insights requested from tui");
    app.screen = Screen::Insights;
    app.insight_scroll = 0;
    if superseded {
        app.set_status("Restarted insights request...");
    } else {
        app.set_status("Generating insights...");
    }
    Ok(())
}

fn cmd_cancel_insights(_args: &str, app: &mut App, _state: &mut AppState) -> anyhow::Result<()> {
    if app.insights.cancel() {
        app.set_status("Insights request cancelled");
    } else {
        app.set_status("No insights request running");
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, state: &mut AppState) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        export::default_export_path(app.today)
    } else {
        PathBuf::from(expand_home(args))
    };
    match export::export_to_csv(state.transactions(), &path) {
        Ok(count) => app.set_status(format!("Exported {count} transactions to {}", path.display())),
        Err(e) => {
            warn!("export failed: {e:#}");
            app.set_status(format!("Export failed: {e:#}"));
        }
    }
    Ok(())
}

/// Resolve the confirmed pending action.
pub(crate) fn confirm_pending(app: &mut App, state: &mut AppState) {
    let Some(action) = app.pending_action.take() else {
        return;
    };
    match action {
        PendingAction::DeleteTransaction { id, summary } => {
            if state.delete_transaction(&id) {
                app.set_status(format!("Deleted: {summary}"));
            } else {
                app.set_status("Transaction was already gone");
            }
        }
        PendingAction::ClearBudgets => {
            state.set_budgets(Budgets::new());
            app.set_status("All budgets removed");
        }
    }
    app.refresh(state);
}

pub(crate) fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::UserDirs::new() {
            return dirs.home_dir().join(rest).to_string_lossy().into_owned();
        }
    }
    path.to_string()
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
