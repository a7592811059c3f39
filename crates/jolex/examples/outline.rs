//! Streams a JSON document through the lexer in small chunks and prints the
//! resulting event outline.

use jolex::{Event, Parser};

fn main() {
    let doc: &[u8] = br#"{"name":"jolex","tags":["json","lexer"],"size":42}"#;

    let mut parser = Parser::new();
    let mut indent = 0usize;
    for chunk in doc.chunks(7) {
        for event in parser.events(chunk) {
            let event = event.expect("document is well-formed");
            if event.is_end() {
                indent -= 1;
            }
            let pad = indent * 2;
            println!("{:pad$}{event:?}", "");
            if event.is_start() {
                indent += 1;
            }
        }
    }
    assert_eq!(parser.end(), Ok(Event::Done));
}
