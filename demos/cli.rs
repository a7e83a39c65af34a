use std::io::{stdin, Read};

use futures::stream;
use gcode_view::{stream::LineReader, Command, Error, ParsingSettings};

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = ParsingSettings::default().with_fractional_scale(3)?;
    let bytes = stdin().lock().bytes().map_while(Result::ok);
    let mut reader = LineReader::new(stream::iter(bytes));

    futures_executor::block_on(async {
        let mut number = 0;
        while let Some(line) = reader.next_line().await {
            number += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    eprintln!("{}: {}", number, e);
                    continue;
                }
            };
            let Some(command) = Command::try_parse(line, &settings) else {
                continue;
            };
            println!("{}: {}", number, command.code());
            for field in command.fields() {
                match field.scaled_int_argument() {
                    Ok(value) => println!("    {} = {} ({:?})", field.word(), value, field.kind()),
                    Err(_) => println!("    {} ({:?})", field, field.kind()),
                }
            }
        }
    });
    Ok(())
}
