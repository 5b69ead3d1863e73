use quickcheck::{Arbitrary, Gen, QuickCheck};

use super::{parse, parse_chunks, rows, strings};
use crate::{ParserOptions, produce_splits};

/// Characters that exercise every tokenizer transition.
const ALPHABET: &[char] = &[
    'a', 'b', '1', '0', '.', '-', 'e', ',', ';', '"', '"', '\r', '\n', ' ', 'é', '😊', '\u{feff}',
];

/// CSV-shaped text drawn from [`ALPHABET`].
#[derive(Clone, Debug)]
struct CsvText(String);

impl Arbitrary for CsvText {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size() * 4 + 1);
        Self((0..len).map(|_| *g.choose(ALPHABET).unwrap()).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let chars: Vec<char> = self.0.chars().collect();
        Box::new(chars.shrink().map(|c| Self(c.into_iter().collect())))
    }
}

fn options_from_bits(bits: u16) -> ParserOptions {
    let bit = |n: u16| bits & (1 << n) != 0;
    ParserOptions {
        delimiter: if bit(0) { ';' } else { ',' },
        multiline: !bit(1),
        allow_quotes: !bit(2),
        skip_empty_lines: bit(3),
        parse_numbers: bit(4),
        parse_booleans: bit(5),
        trim: bit(6),
        ltrim: bit(7),
        header_line: if bit(8) { Some(1 + usize::from(bits >> 12) % 3) } else { None },
        skip_lines: usize::from(bits >> 10) % 3,
        as_object: bit(9),
        ..Default::default()
    }
}

/// Property: feeding a document in arbitrarily sized chunks yields exactly
/// the events of feeding it whole, under any option combination.
#[test]
fn partition_invariance_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: CsvText, splits: Vec<usize>, bits: u16) -> bool {
        let options = options_from_bits(bits);
        let whole = parse(options, &text.0);
        let split = parse_chunks(options, &produce_splits(&text.0, &splits));
        // NaN never compares equal, so compare the rendered events.
        format!("{whole:?}") == format!("{split:?}")
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(CsvText, Vec<usize>, u16) -> bool);
}

/// Property: for fields free of delimiters, quotes and line terminators, the
/// emitted rows are exactly the fields the text was joined from.
#[test]
fn raw_fields_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(table: Vec<Vec<String>>, splits: Vec<usize>) -> bool {
        let table: Vec<Vec<String>> = table
            .into_iter()
            .map(|row| {
                let row: Vec<String> = row
                    .into_iter()
                    .map(|field| {
                        field
                            .chars()
                            .filter(|c| !matches!(c, ',' | '"' | '\r' | '\n' | '\u{feff}'))
                            .collect()
                    })
                    .collect();
                if row.is_empty() { vec![String::new()] } else { row }
            })
            .collect();

        let mut text = String::new();
        for row in &table {
            text.push_str(&row.join(","));
            text.push('\n');
        }

        let events = parse_chunks(ParserOptions::default(), &produce_splits(&text, &splits));
        let expected: Vec<_> = table
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let fields: Vec<&str> = row.iter().map(String::as_str).collect();
                (i + 1, strings(&fields))
            })
            .collect();
        rows(events) == expected
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Vec<Vec<String>>, Vec<usize>) -> bool);
}
