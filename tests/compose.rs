//! End-to-end coverage: lexer -> parser -> trie -> state, driven only through the public API.

use xkb_compose::compose::keysym::from_name;
use xkb_compose::compose::{
    Context, Format, State, Status, Table, CONTEXT_NO_FLAGS, COMPILE_NO_FLAGS, STATE_NO_FLAGS,
};

fn ks(name: &str) -> xkb_compose::compose::Keysym {
    from_name(name).unwrap()
}

fn table_from(src: &str) -> std::rc::Rc<Table> {
    let _ = env_logger::try_init();
    let ctx = Context::new(CONTEXT_NO_FLAGS);
    Table::new_from_buffer(&ctx, src.as_bytes(), "C", Format::TextV1, COMPILE_NO_FLAGS).unwrap()
}

const SAMPLE: &str = "\
<dead_tilde> <space> : \"~\" asciitilde
<dead_tilde> <dead_tilde> : \"~\" asciitilde
<dead_acute> <dead_acute> : \"\u{b4}\" acute
<Multi_key> <A> <T> : \"@\" at
<Multi_key> <apostrophe> <a> : \"x\"
";

#[test]
fn dead_tilde_space_composes_a_tilde() {
    let table = table_from(SAMPLE);
    let mut st = State::new(&table, STATE_NO_FLAGS);
    st.feed(ks("dead_tilde"));
    assert_eq!(st.status(), Status::Composing);
    st.feed(ks("space"));
    assert_eq!(st.status(), Status::Composed);
    assert_eq!(st.utf8().as_deref(), Some("~"));
    assert_eq!(st.keysym(), Some(ks("asciitilde")));
}

#[test]
fn a_composed_sequence_can_be_immediately_repeated() {
    let table = table_from(SAMPLE);
    let mut st = State::new(&table, STATE_NO_FLAGS);
    for _ in 0..3 {
        st.feed(ks("dead_tilde"));
        st.feed(ks("space"));
        assert_eq!(st.status(), Status::Composed);
        assert_eq!(st.utf8().as_deref(), Some("~"));
    }
}

#[test]
fn dead_acute_dead_acute_composes_an_acute_accent() {
    let table = table_from(SAMPLE);
    let mut st = State::new(&table, STATE_NO_FLAGS);
    st.feed(ks("dead_acute"));
    st.feed(ks("dead_acute"));
    assert_eq!(st.status(), Status::Composed);
    assert_eq!(st.utf8().as_deref(), Some("\u{b4}"));
}

#[test]
fn modifiers_interleaved_in_a_sequence_are_ignored() {
    let table = table_from(SAMPLE);
    let mut st = State::new(&table, STATE_NO_FLAGS);
    st.feed(ks("Multi_key"));
    st.feed(ks("Shift_L"));
    st.feed(ks("A"));
    st.feed(ks("Caps_Lock"));
    st.feed(ks("T"));
    assert_eq!(st.status(), Status::Composed);
    assert_eq!(st.utf8().as_deref(), Some("@"));
}

#[test]
fn an_unrecognised_sequence_never_leaves_nothing() {
    let table = table_from(SAMPLE);
    let mut st = State::new(&table, STATE_NO_FLAGS);
    for name in ["7", "a", "b"] {
        st.feed(ks(name));
        assert_eq!(st.status(), Status::Nothing);
    }
}

#[test]
fn an_abandoned_sequence_reports_cancelled_once() {
    let table = table_from(SAMPLE);
    let mut st = State::new(&table, STATE_NO_FLAGS);
    st.feed(ks("Multi_key"));
    st.feed(ks("apostrophe"));
    st.feed(ks("7"));
    assert_eq!(st.status(), Status::Cancelled);
    st.feed(ks("7"));
    assert_eq!(st.status(), Status::Nothing);
}

#[test]
fn reset_always_returns_to_nothing() {
    let table = table_from(SAMPLE);
    let mut st = State::new(&table, STATE_NO_FLAGS);
    st.feed(ks("Multi_key"));
    st.reset();
    assert_eq!(st.status(), Status::Nothing);
}

#[test]
fn a_shorter_sequence_inserted_after_a_longer_one_is_skipped() {
    let table = table_from(
        "<dead_tilde> <space> : \"~\"\n\
         <dead_tilde> : \"bad\"\n",
    );
    let mut st = State::new(&table, STATE_NO_FLAGS);
    st.feed(ks("dead_tilde"));
    assert_eq!(st.status(), Status::Composing);
    st.feed(ks("space"));
    assert_eq!(st.status(), Status::Composed);
    assert_eq!(st.utf8().as_deref(), Some("~"));
}

#[test]
fn two_independent_states_over_one_table_do_not_interfere() {
    let table = table_from(SAMPLE);
    let mut a = State::new(&table, STATE_NO_FLAGS);
    let mut b = State::new(&table, STATE_NO_FLAGS);
    a.feed(ks("dead_tilde"));
    assert_eq!(a.status(), Status::Composing);
    assert_eq!(b.status(), Status::Nothing);
    b.feed(ks("dead_acute"));
    b.feed(ks("dead_acute"));
    assert_eq!(b.status(), Status::Composed);
    assert_eq!(a.status(), Status::Composing);
}

mod proptest_suite {
    use super::*;
    use proptest::prelude::*;

    fn arb_known_keysym_name() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("a"),
            Just("b"),
            Just("7"),
            Just("space"),
            Just("dead_tilde"),
            Just("dead_acute"),
            Just("Multi_key"),
            Just("Shift_L"),
            Just("Caps_Lock"),
        ]
    }

    proptest! {
        /// Feeding any sequence of known keysyms never panics, and `status()` after a `reset()`
        /// is always `Nothing` — resetting always returns to the initial state, regardless of
        /// how the sequence in progress left off.
        #[test]
        fn reset_always_yields_nothing(names in proptest::collection::vec(arb_known_keysym_name(), 0..8)) {
            let table = table_from(SAMPLE);
            let mut st = State::new(&table, STATE_NO_FLAGS);
            for n in &names {
                st.feed(ks(n));
            }
            st.reset();
            prop_assert_eq!(st.status(), Status::Nothing);
        }

        /// A modifier keysym never changes `status()`, whatever state the machine was in.
        #[test]
        fn modifier_feed_is_always_a_no_op(names in proptest::collection::vec(arb_known_keysym_name(), 0..6)) {
            let table = table_from(SAMPLE);
            let mut st = State::new(&table, STATE_NO_FLAGS);
            for n in &names {
                st.feed(ks(n));
            }
            let before = st.status();
            let result = st.feed(ks("Shift_L"));
            prop_assert_eq!(result, xkb_compose::compose::FeedResult::Ignored);
            prop_assert_eq!(st.status(), before);
        }
    }
}
