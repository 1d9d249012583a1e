use std::env;
use std::fs::File;
use std::io::prelude::*;

use yagraph_scanner::Scanner;

fn main() {
    let args: Vec<_> = env::args().collect();
    let mut f = File::open(&args[1]).unwrap();
    let mut s = String::new();
    f.read_to_string(&mut s).unwrap();

    for token in Scanner::new(&s).into_tokens() {
        println!(
            "{:indent$}\x1B[;34m{:?}\x1B[;m {:?} ({})",
            "",
            token.kind,
            token.text,
            token.span,
            indent = token.depth * 2
        );
    }
}
