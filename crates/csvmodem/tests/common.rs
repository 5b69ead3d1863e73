#![allow(missing_docs)]
#![allow(dead_code)]

/// A sensor export with a preamble line, a header on line 2, a blank line
/// and quoted fields carrying delimiters, escapes and an embedded newline.
pub const DOCUMENT: &str = "\u{feff}# export v2\r\nsensor, reading ,ok,note\r\n\r\nalpha,12.5,true,\"calibrated, twice\"\r\nbeta,-NaN,false,\"says \"\"hi\"\"\"\r\ngamma,1e3,TRUE,\"line one\nline two\"\r\ndelta,,true\r\n";

/// `DOCUMENT`, cut where the parser has to carry state across chunks.
pub const STREAM: [&str; 12] = [
    "\u{feff}",                                // byte order mark on its own
    "# export v2\r",                           // ends with CR      CRLF pair split
    "\nsensor, read",                          // starts with LF    header split mid-column
    "ing ,ok,note\r\n\r",                      // ends with CR      blank line split
    "\nalpha,12.",                             // ends with '.'     number split
    "5,true,\"calibrated,",                    // ends with ','     delimiter inside quotes
    " twice\"\r\nbeta,-NaN,false,\"says \"",   // ends with '"'     escape undecided
    "\"hi\"",                                  // ends with '"'     escape undecided again
    "\"\"\r",                                  // escape, closing quote, CR
    "\ngamma,1e3,TRUE,\"line one\n",           // ends with LF      inside a quoted field
    "line two\"",                              // ends with '"'     closing quote undecided
    "\r\ndelta,,true\r\n",                     // last row with an empty field
];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn assert_stream_example() {
    assert_eq!(STREAM.concat(), DOCUMENT);
}
