use super::*;

#[test]
fn latest_arm_is_current() {
    let gate = DebounceGate::default();
    let first = gate.arm();
    assert!(gate.is_current(first));

    let second = gate.arm();
    assert!(!gate.is_current(first));
    assert!(gate.is_current(second));
}

#[test]
fn fresh_gate_has_no_current_generation() {
    let gate = DebounceGate::default();
    assert!(!gate.is_current(1));
}
