mod property_partition;

use crate::{ParseEvent, ParserOptions, Row, StreamingParser, Value};

/// Parse `chunks` in order, then finish, collecting every event.
pub(crate) fn parse_chunks(options: ParserOptions, chunks: &[&str]) -> Vec<ParseEvent> {
    let mut parser = StreamingParser::new(options).unwrap();
    let mut events = Vec::new();
    for chunk in chunks {
        events.extend(parser.feed(chunk));
    }
    events.extend(parser.finish());
    events
}

pub(crate) fn parse(options: ParserOptions, input: &str) -> Vec<ParseEvent> {
    parse_chunks(options, &[input])
}

/// Just the rows, with their line numbers.
pub(crate) fn rows(events: Vec<ParseEvent>) -> Vec<(usize, Row)> {
    events
        .into_iter()
        .filter_map(|event| match event {
            ParseEvent::Row { line, row } => Some((line, row)),
            _ => None,
        })
        .collect()
}

pub(crate) fn strings(fields: &[&str]) -> Row {
    Row::Array(fields.iter().map(|f| Value::from(*f)).collect())
}
