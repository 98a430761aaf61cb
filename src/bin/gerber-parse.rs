use std::{env, fs, process};
use gerber_ast::parse::parse;

fn main() {
    let filename = env::args().nth(1).expect("file name required");
    let input = match fs::read_to_string(&filename) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Cannot read {}: {}", filename, e);
            process::exit(2);
        }
    };

    match parse(&input) {
        Err(e) => {
            eprintln!("Parse error: {}", e.render(&filename, &input));
            process::exit(1);
        }
        Ok(file) => print!("{}", file),
    }
}
