//! Recurring definitions and the catch-up pass that materializes them.

use chrono::NaiveDate;
use uuid::Uuid;

use dompet_domain::{
    Books, Frequency, RecurringRunDetail, RecurringRunReport, RecurringTransaction,
    TransactionKind,
};

use crate::time::Clock;
use crate::transaction_service::{NewTransaction, TransactionService};

/// Upper bound on occurrences materialized per definition per call.
///
/// Bounds worst-case catch-up work for a long-paused definition; a
/// definition further behind than this needs additional calls to
/// [`RecurringService::process`] to fully catch up.
const MAX_OCCURRENCES_PER_RUN: usize = 100;

/// Input for creating or replacing a recurring definition.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecurring {
    pub name: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub wallet_id: Uuid,
    pub category_id: Option<Uuid>,
    pub to_wallet_id: Option<Uuid>,
    pub to_amount: Option<f64>,
    pub frequency: Frequency,
    pub interval: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Owns recurring definitions and drives their due-date advancement.
pub struct RecurringService;

impl RecurringService {
    /// Registers a definition. The first occurrence is never pre-skipped:
    /// `next_run_date` starts at `start_date` even when that is in the
    /// past, and the catch-up loop picks it up from there.
    pub fn add(books: &mut Books, clock: &dyn Clock, input: NewRecurring) -> RecurringTransaction {
        let now = clock.now();
        let currency = books
            .wallet_currency(input.wallet_id)
            .unwrap_or_default()
            .to_string();
        let is_transfer = input.kind == TransactionKind::Transfer;
        let recurring = RecurringTransaction {
            id: Uuid::new_v4(),
            name: input.name,
            amount: input.amount,
            currency,
            kind: input.kind,
            wallet_id: input.wallet_id,
            category_id: if is_transfer { None } else { input.category_id },
            to_wallet_id: if is_transfer { input.to_wallet_id } else { None },
            to_amount: input.to_amount,
            frequency: input.frequency,
            interval: input.interval.max(1),
            start_date: input.start_date,
            end_date: input.end_date,
            next_run_date: input.start_date,
            last_run_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let stored = recurring.clone();
        books.add_recurring(recurring);
        stored
    }

    /// Applies a full changeset. Unknown ids are a silent no-op.
    ///
    /// `next_run_date` is reset only when the start date actually moved;
    /// every other edit leaves the catch-up position untouched.
    pub fn update(books: &mut Books, clock: &dyn Clock, id: Uuid, changes: NewRecurring) {
        let now = clock.now();
        let currency = books
            .wallet_currency(changes.wallet_id)
            .unwrap_or_default()
            .to_string();
        let is_transfer = changes.kind == TransactionKind::Transfer;
        let Some(recurring) = books.recurring_mut(id) else {
            return;
        };
        if changes.start_date != recurring.start_date {
            recurring.next_run_date = changes.start_date;
        }
        recurring.name = changes.name;
        recurring.amount = changes.amount;
        recurring.currency = currency;
        recurring.kind = changes.kind;
        recurring.wallet_id = changes.wallet_id;
        recurring.category_id = if is_transfer { None } else { changes.category_id };
        recurring.to_wallet_id = if is_transfer { changes.to_wallet_id } else { None };
        recurring.to_amount = changes.to_amount;
        recurring.frequency = changes.frequency;
        recurring.interval = changes.interval.max(1);
        recurring.start_date = changes.start_date;
        recurring.end_date = changes.end_date;
        recurring.updated_at = now;
        books.touch();
    }

    /// Pauses or resumes a definition without touching `next_run_date`,
    /// so resuming catches up from where it left off.
    pub fn toggle_active(books: &mut Books, id: Uuid) {
        if let Some(recurring) = books.recurring_mut(id) {
            recurring.is_active = !recurring.is_active;
            books.touch();
        }
    }

    /// Deletes a definition. Already-materialized entries stay.
    pub fn remove(books: &mut Books, id: Uuid) {
        let before = books.recurring.len();
        books.recurring.retain(|recurring| recurring.id != id);
        if books.recurring.len() != before {
            books.touch();
        }
    }

    /// One catch-up pass: materializes every due occurrence of every
    /// active, unexpired definition, capped per definition.
    ///
    /// Each occurrence goes through the transaction ledger, so balances
    /// and budgets update exactly as for a hand-entered transaction.
    pub fn process(books: &mut Books, clock: &dyn Clock) -> RecurringRunReport {
        let today = clock.today();
        let now = clock.now();
        let ids: Vec<Uuid> = books.recurring.iter().map(|recurring| recurring.id).collect();
        let mut report = RecurringRunReport::default();

        for id in ids {
            let Some(def) = books.recurring_by_id(id).cloned() else {
                continue;
            };
            if !def.is_active || def.is_expired(today) {
                continue;
            }

            let mut next_run = def.next_run_date;
            let mut created = 0usize;
            while next_run <= today && created < MAX_OCCURRENCES_PER_RUN {
                TransactionService::add(
                    books,
                    clock,
                    NewTransaction {
                        amount: def.amount,
                        kind: def.kind,
                        date: next_run,
                        wallet_id: def.wallet_id,
                        category_id: def.category_id,
                        to_wallet_id: def.to_wallet_id,
                        to_amount: def.to_amount,
                        description: Some(def.name.clone()),
                    },
                );
                created += 1;
                next_run = def.next_occurrence(next_run);
                if def.end_date.map(|end| next_run > end).unwrap_or(false) {
                    break;
                }
            }

            if created > 0 {
                if let Some(recurring) = books.recurring_mut(id) {
                    recurring.next_run_date = next_run;
                    recurring.last_run_date = Some(now);
                    recurring.updated_at = now;
                }
                books.touch();
                tracing::debug!(
                    recurring = %def.name,
                    created,
                    next_run = %next_run,
                    "materialized recurring occurrences"
                );
                report.processed += 1;
                report.created += created;
                report.details.push(RecurringRunDetail {
                    recurring_id: id,
                    name: def.name,
                    created,
                    next_run_date: next_run,
                });
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::NaiveDate;
    use dompet_domain::{Wallet, WalletKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup(today: NaiveDate) -> (Books, FixedClock, Uuid) {
        let clock = FixedClock::on(today);
        let mut books = Books::new(clock.0);
        let wallet = books.add_wallet(Wallet::new(
            "Main",
            WalletKind::Bank,
            "IDR",
            1_000_000.0,
            clock.0,
        ));
        (books, clock, wallet)
    }

    fn monthly(wallet: Uuid, start: NaiveDate) -> NewRecurring {
        NewRecurring {
            name: "Internet".into(),
            amount: 100_000.0,
            kind: TransactionKind::Expense,
            wallet_id: wallet,
            category_id: None,
            to_wallet_id: None,
            to_amount: None,
            frequency: Frequency::Monthly,
            interval: 1,
            start_date: start,
            end_date: None,
        }
    }

    #[test]
    fn catches_up_every_missed_occurrence() {
        let (mut books, clock, wallet) = setup(date(2025, 8, 7));
        RecurringService::add(&mut books, &clock, monthly(wallet, date(2025, 5, 15)));

        let report = RecurringService::process(&mut books, &clock);
        // May 15, Jun 15, Jul 15, and nothing for Aug 15 yet.
        assert_eq!(report.created, 3);
        assert_eq!(report.processed, 1);
        assert_eq!(books.transactions.len(), 3);
        assert_eq!(books.recurring[0].next_run_date, date(2025, 8, 15));
        assert_eq!(books.wallet(wallet).unwrap().balance, 700_000.0);
    }

    #[test]
    fn second_pass_creates_nothing_new() {
        let (mut books, clock, wallet) = setup(date(2025, 8, 7));
        RecurringService::add(&mut books, &clock, monthly(wallet, date(2025, 6, 1)));
        RecurringService::process(&mut books, &clock);
        let position = books.recurring[0].next_run_date;

        let report = RecurringService::process(&mut books, &clock);
        assert_eq!(report.created, 0);
        assert_eq!(books.recurring[0].next_run_date, position);
    }

    #[test]
    fn next_run_date_never_goes_backward() {
        let (mut books, clock, wallet) = setup(date(2025, 8, 7));
        RecurringService::add(&mut books, &clock, monthly(wallet, date(2025, 7, 1)));
        let mut previous = books.recurring[0].next_run_date;
        for _ in 0..4 {
            RecurringService::process(&mut books, &clock);
            let current = books.recurring[0].next_run_date;
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(books.transactions.len(), 2);
    }

    #[test]
    fn expired_definition_produces_nothing() {
        let (mut books, clock, wallet) = setup(date(2025, 8, 7));
        let mut input = monthly(wallet, date(2025, 1, 1));
        input.end_date = Some(date(2025, 3, 1));
        RecurringService::add(&mut books, &clock, input);

        let report = RecurringService::process(&mut books, &clock);
        assert_eq!(report.created, 0);
        assert!(books.transactions.is_empty());
    }

    #[test]
    fn end_date_stops_generation_mid_run() {
        let (mut books, clock, wallet) = setup(date(2025, 8, 7));
        let mut input = monthly(wallet, date(2025, 6, 1));
        input.end_date = Some(date(2025, 8, 7));
        RecurringService::add(&mut books, &clock, input);

        let report = RecurringService::process(&mut books, &clock);
        // Jun 1, Jul 1, Aug 1; Sep 1 exceeds the end date.
        assert_eq!(report.created, 3);
    }

    #[test]
    fn paused_definition_is_skipped_and_resumes_where_it_left_off() {
        let (mut books, clock, wallet) = setup(date(2025, 8, 7));
        let stored = RecurringService::add(&mut books, &clock, monthly(wallet, date(2025, 7, 1)));
        RecurringService::toggle_active(&mut books, stored.id);

        let report = RecurringService::process(&mut books, &clock);
        assert_eq!(report.created, 0);

        RecurringService::toggle_active(&mut books, stored.id);
        let report = RecurringService::process(&mut books, &clock);
        assert_eq!(report.created, 2);
    }

    #[test]
    fn catch_up_is_capped_per_call() {
        let (mut books, clock, wallet) = setup(date(2025, 8, 7));
        let mut input = monthly(wallet, date(2024, 1, 1));
        input.frequency = Frequency::Daily;
        RecurringService::add(&mut books, &clock, input);

        let report = RecurringService::process(&mut books, &clock);
        assert_eq!(report.created, 100);
        assert_eq!(books.recurring[0].next_run_date, date(2024, 4, 10));

        // A further call keeps draining the backlog.
        let report = RecurringService::process(&mut books, &clock);
        assert_eq!(report.created, 100);
    }

    #[test]
    fn editing_start_date_resets_position_but_other_edits_do_not() {
        let (mut books, clock, wallet) = setup(date(2025, 8, 7));
        let stored = RecurringService::add(&mut books, &clock, monthly(wallet, date(2025, 7, 1)));
        RecurringService::process(&mut books, &clock);
        assert_eq!(books.recurring[0].next_run_date, date(2025, 9, 1));

        let mut changes = monthly(wallet, date(2025, 7, 1));
        changes.amount = 150_000.0;
        RecurringService::update(&mut books, &clock, stored.id, changes);
        assert_eq!(books.recurring[0].next_run_date, date(2025, 9, 1));

        let changes = monthly(wallet, date(2025, 8, 1));
        RecurringService::update(&mut books, &clock, stored.id, changes);
        assert_eq!(books.recurring[0].next_run_date, date(2025, 8, 1));
    }
}
