use chrono::NaiveDate;
use pocket_ledger::{
    core::{
        services::{
            AccountService, BudgetService, CategoryService, ServiceError, TransactionInput,
            TransactionService,
        },
        AppStore, StateContainer,
    },
    domain::{Account, AccountKind, Budget, Category, NotificationPreferences},
    notifications::{RecordingDispatcher, ReminderSettings, REMINDER_KEY},
    persistence::KeyValueStore,
    reducer::Action,
    reports::{budgets_for_month, income_expense_totals, state_warnings, total_balance},
};

mod common;

#[test]
fn services_feed_reports() {
    let mut store = AppStore::new();
    let savings = AccountService::add(
        &mut store,
        Account::new("Savings", AccountKind::Bank)
            .with_number("S-1")
            .with_initial_balance(1000.0)
            .excluded_from_balance(),
    )
    .unwrap();
    TransactionService::add(&mut store, TransactionInput::income("Salary", "2,000", "2024-02-01")).unwrap();
    TransactionService::add(
        &mut store,
        TransactionInput::expense("Rent", "800", "2024-02-02").category("bills"),
    )
    .unwrap();
    TransactionService::add(
        &mut store,
        TransactionInput::income("Interest", "5", "2024-02-28").account(savings),
    )
    .unwrap();
    BudgetService::add(&mut store, Budget::new("bills", 1000.0, "2024-02")).unwrap();

    let state = store.state();
    let totals = income_expense_totals(&state.transactions);
    assert_eq!(totals.income, 2005.0);
    assert_eq!(totals.expense, 800.0);
    assert_eq!(totals.net, 1205.0);
    assert_eq!(total_balance(&state.accounts, &state.transactions), 1200.0);

    let progress = budgets_for_month(&state.budgets, &state.transactions, "2024-02");
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].spent, 800.0);
    assert!(!progress[0].reaches_alert_threshold());
    assert!(state_warnings(state).is_empty());
}

#[test]
fn invalid_input_never_reaches_the_reducer() {
    let mut store = AppStore::new();
    let revision = store.revision();
    let err = TransactionService::add(&mut store, TransactionInput::expense("Tea", "three", "2024-03-01")).unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(message) if message.contains("three")));
    assert!(CategoryService::add(&mut store, Category::new("", "tag")).is_err());
    assert!(BudgetService::add(&mut store, Budget::new("food", -5.0, "2024-03")).is_err());
    assert_eq!(store.revision(), revision);
}

#[test]
fn reminder_follows_notification_preferences() {
    let (mut session, store) = common::memory_session();
    session.apply(Action::SetNotificationPreferences(NotificationPreferences {
        daily_reminder_enabled: true,
        daily_reminder_hour: 21,
        daily_reminder_minute: 15,
    }));

    let mut denied = RecordingDispatcher::denied();
    assert!(!session.apply_daily_reminder(&mut denied));
    assert_eq!(denied.recurring, None);

    let mut granted = RecordingDispatcher::granted();
    assert!(session.apply_daily_reminder(&mut granted));
    assert_eq!(granted.recurring, Some((21, 15)));
    assert!(store.read(REMINDER_KEY).unwrap().is_some());
    assert_eq!(
        ReminderSettings::load(&*store),
        Some(ReminderSettings {
            enabled: true,
            hour: 21,
            minute: 15
        })
    );
}

#[test]
fn trend_uses_configured_window() {
    let (mut session, _store) = common::memory_session();
    TransactionService::add(&mut session, TransactionInput::expense("Tea", "3", "2024-02-10")).unwrap();
    let trend = session.trend(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
    assert_eq!(trend.len(), 6);
    assert_eq!(trend[4].month, "2024-02");
    assert_eq!(trend[4].expense, 3.0);
    assert_eq!(trend[5].expense, 0.0);
}
