//! Guest Memory Tests.
//!
//! Bounds checks on every entry point, little-endian layout, reservation
//! lines, and indivisible read-modify-write under contention.

use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rvhart_core::common::{BusError, MemWidth};
use rvhart_core::soc::memory::reservation::line_of;
use rvhart_core::soc::{Bus, GuestMemory};

const BASE: u64 = 0x1000;

fn ram(size: usize) -> GuestMemory {
    GuestMemory::new(BASE, size)
}

// ─── Host access ─────────────────────────────────────────────────────────────

#[test]
fn reports_its_mapping() {
    let mem = ram(256);
    assert_eq!(mem.base(), BASE);
    assert_eq!(mem.size(), 256);
}

#[test]
fn bulk_bytes_and_words() {
    let mem = ram(64);
    mem.write_words(BASE, &[0x0011_2233, 0x4455_6677]).unwrap();
    assert_eq!(
        mem.read_bytes(BASE, 8).unwrap(),
        vec![0x33, 0x22, 0x11, 0x00, 0x77, 0x66, 0x55, 0x44]
    );
    assert_eq!(mem.load(BASE + 2, MemWidth::Double).unwrap(), 0x4455_6677_0011);
}

#[test]
fn bulk_access_past_the_end_fails() {
    let mem = ram(16);
    assert_eq!(
        mem.write_bytes(BASE + 12, &[0; 8]),
        Err(BusError::OutOfRange {
            addr: BASE + 12,
            width: MemWidth::Byte,
        })
    );
    assert!(mem.read_bytes(BASE - 1, 1).is_err());
    assert!(mem.read_bytes(BASE, 17).is_err());
    assert_eq!(mem.read_bytes(BASE + 16, 0).unwrap(), Vec::<u8>::new());
}

#[rstest]
#[case::byte(MemWidth::Byte, 0xEF)]
#[case::half(MemWidth::Half, 0xBEEF)]
#[case::word(MemWidth::Word, 0xDEAD_BEEF)]
#[case::double(MemWidth::Double, 0x0123_4567_DEAD_BEEF)]
fn store_truncates_load_zero_extends(#[case] width: MemWidth, #[case] expected: u64) {
    let mem = ram(16);
    mem.store(BASE, width, 0x0123_4567_DEAD_BEEF).unwrap();
    assert_eq!(mem.load(BASE, width).unwrap(), expected);
    assert_eq!(mem.load(BASE, MemWidth::Double).unwrap(), expected);
}

#[test]
fn out_of_range_error_carries_address_and_width() {
    let mem = ram(16);
    let err = mem.store(BASE + 14, MemWidth::Word, 0).unwrap_err();
    assert_eq!(
        err,
        BusError::OutOfRange {
            addr: BASE + 14,
            width: MemWidth::Word,
        }
    );
    assert!(err.to_string().contains("0x100e"));
}

#[test]
fn fetch_reads_one_parcel() {
    let mem = ram(16);
    mem.write_bytes(BASE, &[0x13, 0x05, 0xA0, 0x00]).unwrap();
    assert_eq!(mem.fetch(BASE).unwrap(), 0x0513);
    assert_eq!(mem.fetch(BASE + 2).unwrap(), 0x00A0);
    assert!(mem.fetch(BASE + 15).is_err());
}

// ─── Reservations ────────────────────────────────────────────────────────────

#[test]
fn reservation_granularity_is_one_line() {
    assert_eq!(line_of(0x1000), 0x1000);
    assert_eq!(line_of(0x103F), 0x1000);
    assert_eq!(line_of(0x1040), 0x1040);
}

#[test]
fn store_conditional_consumes_the_reservation() {
    let mem = ram(256);
    let _ = mem.load_reserved(0, BASE, MemWidth::Word).unwrap();
    assert!(mem.store_conditional(0, BASE + 4, MemWidth::Word, 1).unwrap());
    assert!(!mem.store_conditional(0, BASE + 4, MemWidth::Word, 2).unwrap());
    assert_eq!(mem.load(BASE + 4, MemWidth::Word).unwrap(), 1);
}

#[test]
fn any_write_to_the_line_breaks_reservations() {
    let mem = ram(256);
    let _ = mem.load_reserved(0, BASE, MemWidth::Double).unwrap();
    let _ = mem.load_reserved(1, BASE + 0x40, MemWidth::Double).unwrap();
    mem.write_bytes(BASE + 0x3F, &[0xFF]).unwrap();
    assert!(!mem.store_conditional(0, BASE, MemWidth::Double, 1).unwrap());
    assert!(mem.store_conditional(1, BASE + 0x40, MemWidth::Double, 1).unwrap());
}

#[test]
fn amo_breaks_reservations_on_its_line() {
    let mem = ram(256);
    let _ = mem.load_reserved(1, BASE + 8, MemWidth::Word).unwrap();
    let _ = mem.amo(BASE, MemWidth::Word, &mut |v| v + 1).unwrap();
    assert!(!mem.store_conditional(1, BASE + 8, MemWidth::Word, 0).unwrap());
}

#[test]
fn cancel_only_drops_that_hart() {
    let mem = ram(256);
    let _ = mem.load_reserved(0, BASE, MemWidth::Word).unwrap();
    let _ = mem.load_reserved(1, BASE, MemWidth::Word).unwrap();
    mem.cancel_reservation(0);
    assert!(!mem.store_conditional(0, BASE, MemWidth::Word, 5).unwrap());
    assert!(mem.store_conditional(1, BASE, MemWidth::Word, 6).unwrap());
}

#[test]
fn failed_lr_leaves_no_reservation() {
    let mem = ram(64);
    assert!(mem.load_reserved(0, BASE + 64, MemWidth::Word).is_err());
    assert!(!mem.store_conditional(0, BASE, MemWidth::Word, 1).unwrap());
}

// ─── Atomics ─────────────────────────────────────────────────────────────────

#[test]
fn amo_returns_old_value_and_stores_new() {
    let mem = ram(16);
    mem.store(BASE, MemWidth::Double, 40).unwrap();
    let old = mem.amo(BASE, MemWidth::Double, &mut |v| v + 2).unwrap();
    assert_eq!(old, 40);
    assert_eq!(mem.load(BASE, MemWidth::Double).unwrap(), 42);
}

#[rstest]
#[case::byte(MemWidth::Byte)]
#[case::half(MemWidth::Half)]
fn atomics_reject_sub_word_widths(#[case] width: MemWidth) {
    let mem = ram(16);
    mem.store(BASE, MemWidth::Double, 7).unwrap();
    assert_eq!(mem.load_reserved(0, BASE, width), Err(BusError::Unsupported { width }));
    assert_eq!(mem.store_conditional(0, BASE, width, 1), Err(BusError::Unsupported { width }));
    assert_eq!(
        mem.amo(BASE, width, &mut |v| v + 1),
        Err(BusError::Unsupported { width })
    );
    assert_eq!(mem.load(BASE, MemWidth::Double).unwrap(), 7);
}

#[test]
fn amo_truncates_to_width() {
    let mem = ram(16);
    mem.store(BASE, MemWidth::Double, u64::MAX).unwrap();
    let old = mem.amo(BASE, MemWidth::Word, &mut |v| v + 1).unwrap();
    assert_eq!(old, 0xFFFF_FFFF);
    assert_eq!(mem.load(BASE, MemWidth::Double).unwrap(), 0xFFFF_FFFF_0000_0000);
}

#[test]
fn concurrent_amos_do_not_lose_updates() {
    const THREADS: u64 = 8;
    const ROUNDS: u64 = 1000;
    let mem = Arc::new(ram(64));
    let workers: Vec<_> = (0..THREADS)
        .map(|_| {
            let mem = Arc::clone(&mem);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    let _ = mem.amo(BASE, MemWidth::Double, &mut |v| v + 1).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(mem.load(BASE, MemWidth::Double).unwrap(), THREADS * ROUNDS);
}

#[test]
fn concurrent_lr_sc_increment() {
    const THREADS: u64 = 4;
    const ROUNDS: u64 = 500;
    let mem = Arc::new(ram(64));
    let workers: Vec<_> = (0..THREADS)
        .map(|hart| {
            let mem = Arc::clone(&mem);
            thread::spawn(move || {
                let mut done = 0;
                while done < ROUNDS {
                    let v = mem.load_reserved(hart, BASE, MemWidth::Word).unwrap();
                    if mem.store_conditional(hart, BASE, MemWidth::Word, v + 1).unwrap() {
                        done += 1;
                    }
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(mem.load(BASE, MemWidth::Word).unwrap(), THREADS * ROUNDS);
}

proptest! {
    #[test]
    fn loads_see_the_last_store(offset in 0u64..56, val in any::<u64>()) {
        let mem = ram(64);
        mem.store(BASE + offset, MemWidth::Double, val).unwrap();
        prop_assert_eq!(mem.load(BASE + offset, MemWidth::Double).unwrap(), val);
        let bytes = mem.read_bytes(BASE + offset, 8).unwrap();
        prop_assert_eq!(bytes, val.to_le_bytes().to_vec());
    }

    #[test]
    fn every_access_past_the_end_fails(extra in 0u64..1024) {
        let mem = ram(64);
        prop_assert!(mem.load(BASE + 64 + extra, MemWidth::Byte).is_err());
        prop_assert!(mem.store(BASE + 61 + extra, MemWidth::Word, 0).is_err());
    }
}
