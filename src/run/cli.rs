use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tokio::runtime::Handle;
use tracing::info;

use crate::advice::AdviceGateway;
use crate::analytics::{self, MonthKey};
use crate::export;
use crate::models::{display_label, parse_budget_entry, Budgets, TransactionDraft, EXPENSE_CATEGORIES};
use crate::store::AppState;
use crate::ui::commands::expand_home;
use crate::ui::util::{format_amount, format_signed, progress_bar, truncate};

pub(crate) fn as_cli(
    args: &[String],
    state: &mut AppState,
    gateway: &AdviceGateway,
    runtime: &Handle,
) -> Result<()> {
    let today = Local::now().date_naive();
    let rest = &args[2..];
    match args[1].as_str() {
        "add" | "a" => cli_add(rest, state, today),
        "edit" => cli_edit(rest, state, today),
        "delete" | "rm" => cli_delete(rest, state),
        "list" | "ls" => cli_list(rest, state),
        "summary" | "s" => cli_summary(state, today),
        "breakdown" => cli_breakdown(state),
        "trend" => cli_trend(state),
        "budget" => cli_budget(rest, state),
        "budgets" => cli_budgets(state, today),
        "clear-budgets" => {
            state.set_budgets(Budgets::new());
            println!("All budgets removed");
            Ok(())
        }
        "export" => cli_export(rest, state, today),
        "insights" | "ai" => cli_insights(state, gateway, runtime),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FinTrack: personal income, expense and budget tracker");
    println!();
    println!("Usage: fintrack [command]");
    println!();
    println!("Commands:");
    println!("  (none)                              Launch interactive TUI");
    println!("  add <kind> <amount> <category> [YYYY-MM-DD] [notes]");
    println!("                                      Record an income or expense");
    println!("  edit <id> [<kind> <amount> <category> [date] [notes]]");
    println!("                                      Show or replace a transaction");
    println!("  delete <id>                         Delete a transaction");
    println!("  list [--month <YYYY-MM>]            List transactions, newest first");
    println!("  summary                             Totals and this month's budgets");
    println!("  breakdown                           Expenses by category");
    println!("  trend                               Income and expense per month");
    println!("  budget <category> [amount]          Set a monthly limit (no amount clears)");
    println!("  budgets                             List limits and this month's spending");
    println!("  clear-budgets                       Remove every budget");
    println!("  export [path]                       Export transactions to CSV");
    println!("  insights                            Ask the AI advisor about your spending");
    println!("  --help, -h                          Show this help");
    println!("  --version, -V                       Show version");
}

fn cli_add(args: &[String], state: &mut AppState, today: NaiveDate) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: fintrack add <income|expense> <amount> <category> [YYYY-MM-DD] [notes]");
    }
    let new = TransactionDraft::parse_args(&args.join(" "), today).validate()?;
    let txn = state.add_transaction(new);
    info!(id = %txn.id, "transaction added from cli");
    println!(
        "Added {} {} ({}) on {} [{}]",
        txn.kind,
        format_amount(txn.amount),
        display_label(&txn.category),
        txn.date,
        txn.id
    );
    Ok(())
}

fn cli_edit(args: &[String], state: &mut AppState, today: NaiveDate) -> Result<()> {
    let Some((id, fields)) = args.split_first() else {
        anyhow::bail!("Usage: fintrack edit <id> <kind> <amount> <category> [YYYY-MM-DD] [notes]");
    };
    let current = state
        .transaction(id)
        .cloned()
        .with_context(|| format!("No transaction with id {id}"))?;

    if fields.is_empty() {
        println!("{}", TransactionDraft::from_transaction(&current).to_args());
        return Ok(());
    }

    let new = TransactionDraft::parse_args(&fields.join(" "), today).validate()?;
    state.update_transaction(new.with_id(current.id));
    println!("Transaction {id} updated");
    Ok(())
}

fn cli_delete(args: &[String], state: &mut AppState) -> Result<()> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: fintrack delete <id>");
    };
    if !state.delete_transaction(id) {
        anyhow::bail!("No transaction with id {id}");
    }
    println!("Deleted {id}");
    Ok(())
}

fn cli_list(args: &[String], state: &AppState) -> Result<()> {
    let month = args
        .windows(2)
        .find(|w| w[0] == "--month")
        .map(|w| parse_month(&w[1]))
        .transpose()?;

    let txns: Vec<_> = state
        .transactions()
        .iter()
        .filter(|t| month.is_none_or(|m| m.contains(t.date)))
        .collect();
    if txns.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<36} {:<10} {:<8} {:<16} {:>12}  Notes",
        "ID", "Date", "Type", "Category", "Amount"
    );
    println!("{}", "─".repeat(100));
    for txn in txns {
        println!(
            "{:<36} {:<10} {:<8} {:<16} {:>12}  {}",
            txn.id,
            txn.date.to_string(),
            txn.kind.label(),
            truncate(&display_label(&txn.category), 16),
            format_signed(txn),
            truncate(&txn.notes, 30),
        );
    }
    Ok(())
}

fn cli_summary(state: &AppState, today: NaiveDate) -> Result<()> {
    let totals = analytics::totals(state.transactions());
    println!("FinTrack: {}", today.format("%B %Y"));
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", format_amount(totals.income));
    println!("  Expenses:   {}", format_amount(totals.expenses));
    println!("  Balance:    {}", format_amount(totals.balance));
    println!("  Total Txns: {}", state.transaction_count());

    let status = analytics::budget_status(state.transactions(), state.budgets(), today);
    if !status.is_empty() {
        println!();
        println!("Budgets this month:");
        for line in &status {
            println!(
                "  {:<16} {} {:>4}%  {} of {}{}",
                line.label(),
                progress_bar(line.fill_ratio(), 20),
                line.percent().to_string(),
                format_amount(line.spent),
                format_amount(line.limit),
                if line.spent > line.limit { "  OVER" } else { "" }
            );
        }
    }
    Ok(())
}

fn cli_breakdown(state: &AppState) -> Result<()> {
    let breakdown = analytics::category_breakdown(state.transactions());
    if breakdown.is_empty() {
        println!("No expenses");
        return Ok(());
    }
    for entry in &breakdown {
        println!("  {:<24} {:>12}", entry.label(), format_amount(entry.total));
    }
    Ok(())
}

fn cli_trend(state: &AppState) -> Result<()> {
    let trend = analytics::monthly_trend(state.transactions());
    if trend.is_empty() {
        println!("No transactions");
        return Ok(());
    }
    println!("{:<8} {:>14} {:>14} {:>14}", "Month", "Income", "Expense", "Net");
    for month in &trend {
        println!(
            "{:<8} {:>14} {:>14} {:>14}",
            month.month.to_string(),
            format_amount(month.income),
            format_amount(month.expense),
            format_amount(month.income - month.expense),
        );
    }
    Ok(())
}

fn cli_budget(args: &[String], state: &mut AppState) -> Result<()> {
    let Some((category, limit)) = args.split_first() else {
        anyhow::bail!("Usage: fintrack budget <category> [amount]");
    };
    let (category, limit) = parse_budget_entry(category, &limit.join(" "))?;
    let next = state.budgets().with_limit(category, limit);
    state.set_budgets(next);
    if limit.is_zero() {
        println!("Budget cleared for {}", display_label(category));
    } else {
        println!(
            "Budget set: {} = {} per month",
            display_label(category),
            format_amount(limit)
        );
    }
    Ok(())
}

fn cli_budgets(state: &AppState, today: NaiveDate) -> Result<()> {
    let spend = analytics::month_expenses_by_category(state.transactions(), MonthKey::of(today));
    println!("{:<18} {:>12} {:>12}", "Category", "Limit", "Spent");
    println!("{}", "─".repeat(44));
    for cat in EXPENSE_CATEGORIES {
        let spent = spend.get(cat.value).copied().unwrap_or(Decimal::ZERO);
        let limit = state
            .budgets()
            .limit_for(cat.value)
            .map(format_amount)
            .unwrap_or_else(|| "-".into());
        println!("{:<18} {:>12} {:>12}", cat.label, limit, format_amount(spent));
    }
    Ok(())
}

fn cli_export(args: &[String], state: &AppState, today: NaiveDate) -> Result<()> {
    let path = args
        .first()
        .map(|a| PathBuf::from(expand_home(a)))
        .unwrap_or_else(|| export::default_export_path(today));
    let count = export::export_to_csv(state.transactions(), &path)?;
    println!("Exported {count} transactions to {}", path.display());
    Ok(())
}

fn cli_insights(state: &AppState, gateway: &AdviceGateway, runtime: &Handle) -> Result<()> {
    if gateway.is_configured() {
        eprintln!("Asking for insights on {} transactions...", state.transaction_count());
    }
    let text = runtime.block_on(gateway.request_insights(state.transactions().to_vec()));
    println!("{text}");
    Ok(())
}

fn parse_month(input: &str) -> Result<MonthKey> {
    let first = NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{input}', expected YYYY-MM"))?;
    Ok(MonthKey::of(first))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
