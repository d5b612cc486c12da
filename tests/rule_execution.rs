//! Successor-chain scenarios, each checked through both the blocking and the
//! async execution path.

use futures::FutureExt;
use rulechain::core::{Check, Rule, SuccessorContainer, Verdict};
use rulechain::engine::{ExecutionConfig, SuccessCallbackPolicy};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct TrueRule;

impl Check for TrueRule {
    fn check(&mut self, _verdict: &mut Verdict) {}
}

struct FalseRule1;

impl Check for FalseRule1 {
    fn check(&mut self, verdict: &mut Verdict) {
        verdict.invalidate("FalseRule1 failed validation");
    }
}

struct FalseRule2;

impl Check for FalseRule2 {
    fn check(&mut self, verdict: &mut Verdict) {
        verdict.invalidate("FalseRule2 failed validation");
    }
}

struct FalseRule3;

impl Check for FalseRule3 {
    fn check(&mut self, verdict: &mut Verdict) {
        verdict.invalidate("FalseRule3 failed validation");
    }
}

struct FalseRuleWithAssociation(&'static str);

impl Check for FalseRuleWithAssociation {
    fn check(&mut self, verdict: &mut Verdict) {
        verdict.invalidate_with(format!("{} failed validation", self.0), self.0);
    }
}

type Log = Arc<Mutex<Vec<&'static str>>>;

/// Marks `rule` in `log` whenever its success callback fires.
fn traced(rule: Rule, log: &Log, label: &'static str) -> Rule {
    let log = Arc::clone(log);
    rule.on_success(move |_| log.lock().unwrap().push(label))
}

/// Executes two identically built trees, one per path, checks they agree and
/// returns the async one.
async fn execute_both<F>(build: F) -> Rule
where
    F: Fn() -> Rule,
{
    let mut blocking = build();
    blocking.execute();

    let mut suspending = build();
    suspending.execute_async().await;

    assert_eq!(blocking.outcome(), suspending.outcome());
    suspending
}

#[tokio::test]
async fn valid_rule_is_valid_after_validation() {
    let rule = execute_both(|| Rule::new(TrueRule)).await;

    assert!(rule.is_valid());
    assert_eq!(rule.error_message(), None);
    assert_eq!(rule.association(), None);
}

#[tokio::test]
async fn invalid_rule_contains_error_message() {
    let rule = execute_both(|| Rule::new(FalseRule1)).await;

    assert!(!rule.is_valid());
    assert_eq!(rule.error_message(), Some("FalseRule1 failed validation"));
}

#[tokio::test]
async fn valid_parent_fails_when_successor_fails() {
    let rule = execute_both(|| {
        Rule::new(TrueRule)
            .if_valid_then_validate([Rule::new(FalseRule1)])
            .unwrap()
    })
    .await;

    assert!(!rule.is_valid());
    assert_eq!(rule.error_message(), Some("FalseRule1 failed validation"));
    assert_eq!(rule.association(), None);
}

#[tokio::test]
async fn successor_does_not_execute_when_parent_fails() {
    let rule = execute_both(|| {
        Rule::new(FalseRule1)
            .if_valid_then_validate([Rule::new(FalseRule2)])
            .unwrap()
    })
    .await;

    assert_eq!(rule.error_message(), Some("FalseRule1 failed validation"));
    assert!(rule.successors()[0].rules()[0].is_valid());
}

#[tokio::test]
async fn remaining_successors_skip_when_first_fails() {
    let rule = execute_both(|| {
        Rule::new(TrueRule)
            .if_valid_then_validate([
                Rule::new(FalseRule1),
                Rule::new(FalseRule2),
                Rule::new(FalseRule3),
            ])
            .unwrap()
    })
    .await;

    assert_eq!(rule.error_message(), Some("FalseRule1 failed validation"));
}

#[tokio::test]
async fn last_successor_validates_when_first_successors_pass() {
    let rule = execute_both(|| {
        Rule::new(TrueRule)
            .if_valid_then_validate([
                Rule::new(TrueRule),
                Rule::new(TrueRule),
                Rule::new(FalseRule3),
            ])
            .unwrap()
    })
    .await;

    assert_eq!(rule.error_message(), Some("FalseRule3 failed validation"));
}

#[tokio::test]
async fn later_groups_are_skipped_when_earlier_group_fails() {
    let rule = execute_both(|| {
        Rule::new(TrueRule)
            .if_valid_then_validate([Rule::new(TrueRule), Rule::new(FalseRule1)])
            .unwrap()
            .if_valid_then_validate([Rule::new(FalseRule2)])
            .unwrap()
    })
    .await;

    assert_eq!(rule.error_message(), Some("FalseRule1 failed validation"));
}

#[tokio::test]
async fn parent_fails_when_last_group_fails() {
    let rule = execute_both(|| {
        Rule::new(TrueRule)
            .if_valid_then_validate([Rule::new(TrueRule), Rule::new(TrueRule)])
            .unwrap()
            .if_valid_then_validate([Rule::new(FalseRule2), Rule::new(FalseRule3)])
            .unwrap()
    })
    .await;

    assert!(!rule.is_valid());
    assert_eq!(rule.error_message(), Some("FalseRule2 failed validation"));
}

#[tokio::test]
async fn three_rule_chain_executes_successfully() {
    let rule = execute_both(|| {
        Rule::new(TrueRule)
            .if_valid_then_validate([Rule::new(TrueRule)
                .if_valid_then_validate([Rule::new(TrueRule)])
                .unwrap()])
            .unwrap()
    })
    .await;

    assert!(rule.is_valid());
}

#[tokio::test]
async fn three_rule_chain_skips_third_when_second_fails() {
    let rule = execute_both(|| {
        Rule::new(TrueRule)
            .if_valid_then_validate([Rule::new(FalseRule1)
                .if_valid_then_validate([Rule::new(FalseRule2)])
                .unwrap()])
            .unwrap()
    })
    .await;

    assert_eq!(rule.error_message(), Some("FalseRule1 failed validation"));
}

#[tokio::test]
async fn three_rule_chain_hits_third_and_fails_parent() {
    let rule = execute_both(|| {
        Rule::new(TrueRule)
            .if_valid_then_validate([Rule::new(TrueRule)
                .if_valid_then_validate([Rule::new(FalseRule3)])
                .unwrap()])
            .unwrap()
    })
    .await;

    assert_eq!(rule.error_message(), Some("FalseRule3 failed validation"));
}

#[tokio::test]
async fn association_is_copied_from_failed_successor() {
    let rule = execute_both(|| {
        Rule::new(TrueRule)
            .named("Foo")
            .if_valid_then_validate([
                Rule::new(TrueRule),
                Rule::new(FalseRuleWithAssociation("Address")),
            ])
            .unwrap()
    })
    .await;

    assert_eq!(rule.association(), Some("Address"));
    assert_eq!(rule.error_message(), Some("Address failed validation"));
}

#[test]
fn success_callback_fires_for_valid_rule() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut rule = Rule::new(TrueRule).on_success(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    rule.execute();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn success_callback_does_not_fire_for_invalid_rule() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut rule = Rule::new(FalseRule1).on_success(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    rule.execute();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failure_callback_sees_failed_rule() {
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let mut rule = Rule::new(FalseRuleWithAssociation("Zip")).on_failure_async(move |rule| {
        let message = rule.error_message().map(str::to_owned);
        let sink = Arc::clone(&sink);
        async move {
            *sink.lock().unwrap() = message;
        }
        .boxed()
    });

    rule.execute_async().await;

    assert_eq!(seen.lock().unwrap().as_deref(), Some("Zip failed validation"));
}

#[test]
fn failure_callback_does_not_fire_for_valid_rule() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut rule = Rule::new(TrueRule).on_failure(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    rule.execute();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn successor_callbacks_fire_on_their_own_outcome() {
    let log = Log::default();
    let failed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&failed);

    let mut rule = Rule::new(TrueRule)
        .if_valid_then_validate([
            traced(Rule::new(TrueRule), &log, "first"),
            Rule::new(FalseRule1).on_failure(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            traced(Rule::new(TrueRule), &log, "never"),
        ])
        .unwrap();

    rule.execute();

    assert_eq!(*log.lock().unwrap(), vec!["first"]);
    assert_eq!(failed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rules_in_second_group_execute_until_failure() {
    let log = Log::default();
    let mut rule = Rule::new(TrueRule)
        .if_valid_then_validate([
            traced(Rule::new(TrueRule), &log, "g1-a"),
            traced(Rule::new(TrueRule), &log, "g1-b"),
        ])
        .unwrap()
        .if_valid_then_validate([
            traced(Rule::new(TrueRule), &log, "g2-a"),
            traced(Rule::new(FalseRule2), &log, "g2-b"),
            traced(Rule::new(FalseRule3), &log, "g2-c"),
        ])
        .unwrap();

    rule.execute_async().await;

    assert_eq!(*log.lock().unwrap(), vec!["g1-a", "g1-b", "g2-a"]);
    assert_eq!(rule.error_message(), Some("FalseRule2 failed validation"));
}

#[test]
fn success_callback_fires_once_after_deepest_successor() {
    let log = Log::default();
    let deepest = traced(Rule::new(TrueRule), &log, "depth-3");
    let middle = traced(
        Rule::new(TrueRule).if_valid_then_validate([deepest]).unwrap(),
        &log,
        "depth-2",
    );
    let top = traced(
        Rule::new(TrueRule).if_valid_then_validate([middle]).unwrap(),
        &log,
        "depth-1",
    );
    let mut root = traced(
        Rule::new(TrueRule).if_valid_then_validate([top]).unwrap(),
        &log,
        "root",
    );

    root.execute();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["depth-3", "depth-2", "depth-1", "root"]
    );
}

#[test]
fn strict_policy_suppresses_success_after_successor_failure() {
    let log = Log::default();
    let mut rule = traced(
        Rule::new(TrueRule)
            .if_valid_then_validate([Rule::new(FalseRule1)])
            .unwrap(),
        &log,
        "parent",
    );

    rule.execute_with(&ExecutionConfig::new().success_callback(SuccessCallbackPolicy::OnlyWhenValid));
    assert!(log.lock().unwrap().is_empty());

    rule.execute();
    assert_eq!(*log.lock().unwrap(), vec!["parent"]);
}

#[test]
fn last_attached_callback_wins() {
    let log = Log::default();
    let first = Arc::clone(&log);
    let second = Arc::clone(&log);
    let mut rule = Rule::new(TrueRule)
        .on_success(move |_| first.lock().unwrap().push("first"))
        .on_success(move |_| second.lock().unwrap().push("second"));

    rule.execute();

    assert_eq!(*log.lock().unwrap(), vec!["second"]);
}

#[test]
fn re_execution_is_deterministic_and_refires_callbacks() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut rule = Rule::new(TrueRule)
        .if_valid_then_validate([Rule::new(FalseRuleWithAssociation("Email"))])
        .unwrap()
        .on_failure(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    let first = rule.execute().outcome().clone();
    let second = rule.execute().outcome().clone();

    assert_eq!(first, second);
    assert_eq!(second.association(), Some("Email"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn successor_tree_is_walkable() {
    let rule = Rule::new(TrueRule)
        .if_valid_then_validate([Rule::new(TrueRule), Rule::new(FalseRule2)])
        .unwrap()
        .if_valid_then_validate([
            Rule::new(TrueRule)
                .if_valid_then_validate([Rule::new(FalseRule1)])
                .unwrap(),
            Rule::new(FalseRule3),
        ])
        .unwrap();

    let names: Vec<&str> = rule.walk().map(|(_, r)| r.name()).collect();
    assert_eq!(
        names,
        vec!["TrueRule", "TrueRule", "FalseRule2", "TrueRule", "FalseRule1", "FalseRule3"]
    );
}
