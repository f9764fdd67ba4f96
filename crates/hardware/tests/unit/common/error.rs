//! Trap and Error Vocabulary Tests.
//!
//! Verifies the `mcause` code and `mtval` value every trap reports, the
//! access-fault mapping, and the display text of host-side errors.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvhart_core::common::{AccessType, BusError, ConfigError, MemWidth, Trap};

#[rstest]
#[case(Trap::InstructionAddressMisaligned(0x8000_0002), 0, 0x8000_0002)]
#[case(Trap::InstructionAccessFault(0x1000), 1, 0x1000)]
#[case(Trap::IllegalInstruction(0xFFFF_FFFF), 2, 0xFFFF_FFFF)]
#[case(Trap::Breakpoint(0x8000_0010), 3, 0x8000_0010)]
#[case(Trap::LoadAddressMisaligned(0x1001), 4, 0x1001)]
#[case(Trap::LoadAccessFault(0x10), 5, 0x10)]
#[case(Trap::StoreAddressMisaligned(0x1003), 6, 0x1003)]
#[case(Trap::StoreAccessFault(0x20), 7, 0x20)]
#[case(Trap::EnvironmentCall, 11, 0)]
fn trap_reports_cause_and_tval(#[case] trap: Trap, #[case] cause: u64, #[case] tval: u64) {
    assert_eq!(trap.cause(), cause);
    assert_eq!(trap.tval(), tval);
}

#[rstest]
#[case(AccessType::Fetch, Trap::InstructionAccessFault(0x40))]
#[case(AccessType::Read, Trap::LoadAccessFault(0x40))]
#[case(AccessType::Write, Trap::StoreAccessFault(0x40))]
fn access_fault_matches_access_type(#[case] access: AccessType, #[case] expected: Trap) {
    assert_eq!(Trap::access_fault(access, 0x40), expected);
}

#[test]
fn display_messages() {
    assert_eq!(
        Trap::IllegalInstruction(0x13).to_string(),
        "illegal instruction (0x13)"
    );
    assert_eq!(Trap::EnvironmentCall.to_string(), "environment call");
    let bus = BusError::OutOfRange {
        addr: 0x10,
        width: MemWidth::Word,
    };
    assert_eq!(
        bus.to_string(),
        "access of Word at 0x10 is outside mapped memory"
    );
    let narrow = BusError::Unsupported {
        width: MemWidth::Double,
    };
    assert_eq!(narrow.to_string(), "Double access is not supported by this bus");
    let cfg = ConfigError::MissingDependency {
        extension: 'D',
        requires: 'F',
    };
    assert_eq!(cfg.to_string(), "extension D requires extension F");
    let mismatch = ConfigError::XlenMismatch {
        expected: 64,
        found: 32,
    };
    assert_eq!(
        mismatch.to_string(),
        "configuration selects 32-bit registers, hart is 64-bit"
    );
}
