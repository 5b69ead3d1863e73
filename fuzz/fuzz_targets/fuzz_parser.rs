#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use csvmodem::{ParseEvent, ParserOptions, StreamingParser};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 5; // 1 flag byte + 4-byte seed

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static TERMINATORS: &[&[u8]] = &[b"\n", b"\r\n", b"\r"];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);

        // split-seed
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;

        while prefix < size.max(HEADER + 1) && prefix < max_size {
            let limit = max_size - prefix;

            prefix += append_record(&mut data[prefix..], size, limit);
            prefix += append_terminator(&mut data[prefix..], max_size - prefix);
        }

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append one line terminator chosen at random, falling back to LF when the
/// choice would exceed `limit`. Returns the number of bytes written.
fn append_terminator(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        let mut t = TERMINATORS[rng.random_range(0..TERMINATORS.len())];
        if t.len() > limit {
            t = &b"\n"[..];
        }
        if t.len() > limit {
            return 0;
        }
        buf[..t.len()].copy_from_slice(t);
        t.len()
    })
}

fn append_record(data: &mut [u8], size: usize, limit: usize) -> usize {
    let record = loop {
        let s = with_rng(|rng| rng.random_range(1..size.max(2) * 2).min(limit.max(1)));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(record) = ArbitraryRecord::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break record;
        }
    };

    let serialized = record.0.into_bytes();
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// One CSV record: fields that are bare, quoted with doubled quotes, or
/// quoted around line breaks.
#[derive(Debug)]
struct ArbitraryRecord(String);

impl<'a> Arbitrary<'a> for ArbitraryRecord {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let fields: Vec<String> = u.arbitrary()?;
        let mut record = String::new();
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                record.push(',');
            }
            match u.choose_index(4)? {
                0 => record.extend(field.chars().filter(|c| !matches!(c, ',' | '"' | '\r' | '\n'))),
                1 => {
                    record.push('"');
                    record.push_str(&field.replace('"', "\"\""));
                    record.push('"');
                }
                2 => {
                    let n: f64 = u.arbitrary()?;
                    record.push_str(&n.to_string());
                }
                _ => record.push_str(if u.arbitrary()? { "true" } else { "false" }),
            }
        }
        Ok(ArbitraryRecord(record))
    }
}

fn options(flags: u8) -> ParserOptions {
    ParserOptions {
        delimiter: if flags & 1 != 0 { ';' } else { ',' },
        multiline: flags & 2 == 0,
        allow_quotes: flags & 4 == 0,
        skip_empty_lines: flags & 8 != 0,
        parse_numbers: flags & 16 != 0,
        parse_booleans: flags & 16 != 0,
        trim: flags & 32 != 0,
        header_line: if flags & 64 != 0 { Some(1) } else { None },
        as_object: flags & 128 != 0,
        ..ParserOptions::default()
    }
}

fn collect(options: ParserOptions, chunks: &[&str]) -> Vec<ParseEvent> {
    let mut parser = StreamingParser::new(options).expect("valid options");
    let mut events = Vec::new();
    for chunk in chunks {
        events.extend(parser.feed(chunk));
    }
    events.extend(parser.finish());
    events
}

fn parser(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u32::from_le_bytes(data[1..5].try_into().unwrap()) as u64;
    let data = &data[5..];

    if data.is_empty() {
        return;
    }

    let str = String::from_utf8_lossy(data).into_owned();

    // Use the random number we chose to split the input into chunks:
    let chunks = split_into_safe_chunks(&str, split_seed);
    let whole = collect(options(flags), &[&str]);
    let split = collect(options(flags), &chunks);

    // NaN fields never compare equal, so compare the rendered events.
    assert_eq!(format!("{whole:?}"), format!("{split:?}"));
    assert!(matches!(split.last(), Some(ParseEvent::End)));
}

fuzz_target!(|data: &[u8]| parser(data));

/// Split a UTF-8 `&str` into boundary-safe chunks using a deterministic random
/// value to generate splits.
///
/// * `split_seed` may be any `u64`.
/// * Each chunk is at least one byte.
/// * Every slice ends on a valid UTF-8 boundary, so it can’t panic.
fn split_into_safe_chunks(serialized: &str, split_seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = serialized.len();
    let mut seed = split_seed;

    while start < len {
        let remaining = len - start;

        // Derive a candidate size from the seed, then advance it so that
        // chunk sizes vary.
        let mut size = (seed as usize % remaining) + 1;
        seed = seed.rotate_left(7) ^ 0x9E37_79B9;

        // Bump `size` forward until it lands on a char boundary
        // (or hits the end of the string, which is always a boundary).
        while start + size < len && !serialized.is_char_boundary(start + size) {
            size += 1;
        }

        chunks.push(&serialized[start..start + size]);
        start += size;
    }

    chunks
}
