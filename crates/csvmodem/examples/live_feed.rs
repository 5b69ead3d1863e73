//! Demonstrates reacting to rows of a CSV feed **as they arrive**, without
//! waiting for the feed to finish.
//!
//! A market-data service streams quotes as CSV over a slow connection:
//!
//! ```text
//! ts,symbol,price,status
//! 1,ACME,12.5,open
//! ...
//! ```
//!
//! The chunks below are cut at awkward places (inside a number, inside a
//! quoted field) the way network reads would cut them. Each quote is printed
//! the moment its row completes, and the first `halt` status stops
//! processing even though more data is still queued.
//!
//! Run with
//!
//! ```bash
//! cargo run -p csvmodem --example live_feed
//! ```

use csvmodem::{ParseEvent, ParserOptions, StreamingParser, Value};

fn main() {
    // In real life this would come from the network.
    let simulated_stream: [&str; 5] = [
        // 0 – header and the start of the first quote
        "ts,symbol,price,status\n1,ACME,1",
        // 1 – finish the first quote, a whole second one, start of the third
        "2.5,open\n2,ACME,12.75,open\n3,AC",
        // 2 – a price quoted because it uses a decimal comma
        "ME,\"13,0\",\"open\"\n4,ACME,1",
        // 3 – trading halts
        "1.0, halt\n",
        // 4 – never looked at
        "5,ACME,9.9,open\n",
    ];

    let mut parser = StreamingParser::new(ParserOptions {
        as_object: true,
        trim: true,
        parse_numbers: true,
        ..ParserOptions::default()
    })
    .expect("options are valid");

    let mut log = String::from("\n");

    'feed: for chunk in simulated_stream {
        for event in parser.feed(chunk) {
            match event {
                ParseEvent::Header { columns } => {
                    println!("📋  Columns: {}", columns.join(", "));
                }
                ParseEvent::Row { line, row } => {
                    if row.get("status").and_then(Value::as_str) == Some("halt") {
                        eprintln!("🛑  Trading halted at line {line} – stopping");
                        log.push_str(&format!("{line}: halted\n"));
                        break 'feed;
                    }
                    let symbol = row.get("symbol").cloned().unwrap_or_default();
                    let price = row.get("price").cloned().unwrap_or_default();
                    println!("📈  {symbol} @ {price}");
                    log.push_str(&format!("{line}: {symbol} @ {price}\n"));
                }
                ParseEvent::End => {}
            }
        }
    }

    // Run `cargo insta review` after the first execution to approve the
    // snapshot.
    #[cfg(not(miri))]
    insta::assert_snapshot!(log, @r"
    2: ACME @ 12.5
    3: ACME @ 12.75
    4: ACME @ 13,0
    5: halted
    ");
}
