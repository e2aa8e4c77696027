//! Property-based tests for the expense workflow.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use spendflow_shared::WorkflowConfig;

use super::reference::ReferenceGenerator;
use super::types::{Decision, ExpenseState, NewExpense};
use super::workflow::ExpenseWorkflow;
use crate::currency::ConversionService;
use crate::currency::exchange::MockRateProvider;
use crate::directory::{Role, Session, UserDirectory};
use crate::store::InMemoryRepository;

/// Replays a fixed list of references, cycling when exhausted.
struct ScriptedReferences {
    refs: Vec<String>,
    next: std::sync::atomic::AtomicUsize,
}

impl ReferenceGenerator for ScriptedReferences {
    fn next_reference(&self) -> String {
        let i = self.next.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.refs[i % self.refs.len()].clone()
    }
}

fn workflow(refs: Vec<String>) -> ExpenseWorkflow {
    let mut rates = MockRateProvider::new();
    rates.expect_latest_rates().never();
    ExpenseWorkflow::new(
        Arc::new(InMemoryRepository::default()),
        Arc::new(ConversionService::new(Arc::new(rates))),
        Arc::new(UserDirectory::new(Arc::new(InMemoryRepository::default()))),
        WorkflowConfig::default(),
    )
    .with_references(Arc::new(ScriptedReferences {
        refs,
        next: std::sync::atomic::AtomicUsize::new(0),
    }))
}

fn session() -> Session {
    Session {
        name: "Prop".into(),
        email: "prop@x.com".into(),
        role: Role::Employee,
        company: None,
    }
}

fn new_expense(cents: i64) -> NewExpense {
    NewExpense {
        amount: Decimal::new(cents, 2),
        currency: "USD".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        category: "Misc".into(),
        description: String::new(),
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

/// References drawn from a small pool so duplicates are common.
fn reference() -> impl Strategy<Value = String> {
    (1000u16..1010u16).prop_map(|n| format!("EXP/{n}"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Listing returns exactly the reverse of the submission order.
    #[test]
    fn prop_listing_is_reverse_insertion(amounts in prop::collection::vec(1i64..1_000_000, 1..20)) {
        let refs: Vec<String> = (0..amounts.len()).map(|i| format!("EXP/{}", 1000 + i)).collect();
        let wf = workflow(refs.clone());
        let user = session();

        let listed = runtime().block_on(async {
            for cents in &amounts {
                wf.submit_expense(new_expense(*cents), &user).await.unwrap();
            }
            wf.list_expenses().await.unwrap()
        });

        let listed_refs: Vec<String> = listed.iter().map(|e| e.reference.clone()).collect();
        let mut expected = refs;
        expected.reverse();
        prop_assert_eq!(listed_refs, expected);

        let listed_amounts: Vec<Decimal> = listed.iter().map(|e| e.amount).collect();
        let expected_amounts: Vec<Decimal> =
            amounts.iter().rev().map(|c| Decimal::new(*c, 2)).collect();
        prop_assert_eq!(listed_amounts, expected_amounts);
    }

    /// After approving a reference, no record with it is still pending.
    #[test]
    fn prop_approved_reference_leaves_queue(
        refs in prop::collection::vec(reference(), 1..15),
        pick in any::<prop::sample::Index>(),
    ) {
        let target = refs[pick.index(refs.len())].clone();
        let wf = workflow(refs.clone());
        let user = session();

        let (matched, pending) = runtime().block_on(async {
            for _ in &refs {
                wf.submit_expense(new_expense(100), &user).await.unwrap();
            }
            let matched = wf.decide_expense(&target, Decision::Approved).await.unwrap();
            (matched, wf.list_pending_approvals(&user).await.unwrap())
        });

        prop_assert_eq!(matched, refs.iter().filter(|r| **r == target).count());
        prop_assert!(pending.iter().all(|e| e.reference != target));
        prop_assert_eq!(pending.len(), refs.len() - matched);
    }

    /// Rejecting twice leaves every matching record rejected without error.
    #[test]
    fn prop_rejection_is_idempotent(refs in prop::collection::vec(reference(), 1..10)) {
        let target = refs[0].clone();
        let wf = workflow(refs.clone());
        let user = session();

        let (first, second, states) = runtime().block_on(async {
            for _ in &refs {
                wf.submit_expense(new_expense(100), &user).await.unwrap();
            }
            let first = wf.decide_expense(&target, Decision::Rejected).await;
            let second = wf.decide_expense(&target, Decision::Rejected).await;
            let states: Vec<ExpenseState> = wf
                .list_expenses()
                .await
                .unwrap()
                .into_iter()
                .filter(|e| e.reference == target)
                .map(|e| e.state)
                .collect();
            (first, second, states)
        });

        prop_assert!(first.is_ok());
        prop_assert_eq!(first.ok(), second.ok());
        prop_assert!(states.iter().all(|s| *s == ExpenseState::Rejected));
    }
}
