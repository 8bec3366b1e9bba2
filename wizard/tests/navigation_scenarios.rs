//! End-to-end navigation scenarios through the public controller API.

use wizard::controller::ROOT_STEP;
use wizard::core::types::{AbortReason, FinishOutcome, StayReason, Transition, WizardStatus};
use wizard::scripted::{Hook, Journal};
use wizard::test_support::{failing_commit, hidden, modes_wizard, rejecting, spec, step_id};

#[test]
fn advance_walks_visible_steps_and_stops_at_the_end() {
    let journal = Journal::default();
    let mut wizard = modes_wizard(
        &journal,
        vec![("empty", vec![spec("a"), hidden("b"), spec("c")])],
    );
    let a = step_id(&wizard, "a");
    let c = step_id(&wizard, "c");

    assert_eq!(wizard.current_step(), ROOT_STEP);
    assert_eq!(wizard.advance().expect("advance").current(), a);
    assert_eq!(wizard.advance().expect("advance").current(), c);
    assert_eq!(
        wizard.advance().expect("advance"),
        Transition::Stayed {
            at: c,
            reason: StayReason::LastStep
        }
    );
    assert_eq!(journal.count("c", Hook::Leave), 0);
}

#[test]
fn consecutive_hidden_steps_are_skipped_together() {
    let journal = Journal::default();
    let mut wizard = modes_wizard(
        &journal,
        vec![("empty", vec![spec("a"), hidden("b"), hidden("c"), spec("d")])],
    );
    wizard.advance().expect("advance");
    wizard.advance().expect("advance");
    assert_eq!(wizard.current_step_name(), "d");
    wizard.retreat().expect("retreat");
    assert_eq!(wizard.current_step_name(), "a");
}

#[test]
fn rejected_step_is_not_left() {
    let journal = Journal::default();
    let mut wizard = modes_wizard(&journal, vec![("empty", vec![rejecting("a"), spec("b")])]);
    wizard.advance().expect("advance");
    let a = step_id(&wizard, "a");

    for _ in 0..2 {
        let transition = wizard.advance().expect("advance");
        assert_eq!(transition.current(), a);
    }
    assert_eq!(journal.count("a", Hook::Validate), 2);
    assert_eq!(journal.count("a", Hook::Leave), 0);
    assert_eq!(wizard.view().errors.len(), 2);
}

#[test]
fn finish_stops_at_failing_commit_and_stays_open() {
    let journal = Journal::default();
    let mut wizard = modes_wizard(
        &journal,
        vec![(
            "empty",
            vec![spec("a"), failing_commit("b", "cannot write project file"), spec("c")],
        )],
    );
    let b = step_id(&wizard, "b");
    wizard.advance().expect("advance");

    assert_eq!(
        wizard.finish().expect("finish"),
        FinishOutcome::Aborted {
            at: b,
            reason: AbortReason::CommitFailed
        }
    );
    assert_eq!(journal.count("a", Hook::Finalize), 1);
    assert_eq!(journal.count("b", Hook::Finalize), 1);
    assert!(journal.hooks_for("c").is_empty());
    assert_eq!(wizard.status(), WizardStatus::Open);
    assert_eq!(wizard.current_step(), b);

    // The wizard is still usable after an aborted finish.
    wizard.retreat().expect("retreat");
    assert_eq!(wizard.current_step_name(), "a");
}

#[test]
fn jump_switches_mode_only_across_modes() {
    let journal = Journal::default();
    let mut wizard = modes_wizard(
        &journal,
        vec![
            ("empty", vec![spec("name"), spec("sdk")]),
            ("import", vec![spec("source")]),
        ],
    );
    wizard.advance().expect("advance");

    assert!(wizard.navigate_to(|_, step| step.name() == "sdk").expect("jump"));
    assert_eq!(wizard.active_mode(), Some("empty"));

    assert!(wizard.navigate_to(|_, step| step.name() == "source").expect("jump"));
    assert_eq!(wizard.active_mode(), Some("import"));
    assert!(wizard.navigation_state().is_last);

    // Back from the only step of the new mode lands on the root step.
    wizard.retreat().expect("retreat");
    assert_eq!(wizard.current_step(), ROOT_STEP);
    assert_eq!(wizard.mode_names(), vec!["empty", "import"]);
}

#[test]
fn cancel_disposes_every_step_once() {
    let journal = Journal::default();
    let mut wizard = modes_wizard(
        &journal,
        vec![
            ("empty", vec![spec("name")]),
            ("import", vec![spec("source")]),
        ],
    );
    wizard.cancel().expect("cancel");
    drop(wizard);
    assert_eq!(journal.count("name", Hook::Dispose), 1);
    assert_eq!(journal.count("source", Hook::Dispose), 1);
}
