use chrono::{DateTime, Duration, TimeZone, Utc};
use readify_ledger::{
    clock::FixedClock,
    ledger::{Bank, LedgerError, in_memory_ledger::InMemoryLedger},
};
use rust_decimal_macros::dec;

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 6, 1, 8, 30, 0).unwrap() + Duration::days(n)
}

#[test]
fn alice_pays_bob_and_leaves() {
    let mut ledger = InMemoryLedger::new(FixedClock(day(3)));

    let alice = ledger.open_savings_account("Alice", day(0)).unwrap();
    assert_eq!(alice.number().to_string(), "SV-000001");
    assert_eq!(alice.balance(), dec!(0));
    let alice = alice.number();

    ledger.deposit(alice, dec!(100), "deposit", day(0)).unwrap();
    assert_eq!(ledger.balance(alice).unwrap(), dec!(100));
    assert_eq!(ledger.transaction_log().len(), 1);

    let err = ledger.withdraw(alice, dec!(150), "withdrawal", day(1)).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds(_)));
    assert_eq!(ledger.balance(alice).unwrap(), dec!(100));

    let bob = ledger.open_savings_account("Bob", day(0)).unwrap().number();
    assert_eq!(bob.to_string(), "SV-000002");
    ledger.transfer(alice, bob, dec!(50), "dinner", day(2)).unwrap();
    assert_eq!(ledger.balance(alice).unwrap(), dec!(50));
    assert_eq!(ledger.balance(bob).unwrap(), dec!(50));
    assert_eq!(ledger.transaction_log().len(), 3);

    let rows = ledger.close_account(alice, day(3)).unwrap();
    let amounts: Vec<_> = rows.iter().map(|row| row.amount()).collect();
    assert_eq!(amounts, vec![dec!(100), dec!(-50), dec!(-50)]);
    assert_eq!(rows[2].description(), "closing withdrawal");
    assert_eq!(rows[2].date(), day(3));

    assert_eq!(ledger.accounts().len(), 1);
    assert_eq!(ledger.accounts()[0].number(), bob);
    assert_eq!(ledger.closed_accounts()[0].number(), alice);
    assert_eq!(ledger.balance(alice), Err(LedgerError::NotFound(alice)));

    // numbering carries on after a closure
    let carol = ledger.open_savings_account("Carol", day(3)).unwrap();
    assert_eq!(carol.number().to_string(), "SV-000003");
}
