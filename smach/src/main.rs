#[macro_use]
extern crate clap;

use clap::Arg;
use scpu::OutputMode;

fn main() {
    env_logger::init();

    let matches = app_from_crate!()
        .arg(
            Arg::with_name("IMAGE")
                .help("Sets the code image to execute")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file to read from")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to write to")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::with_name("mode")
                .short("m")
                .long("mode")
                .takes_value(true)
                .value_name("MODE")
                .default_value("text")
                .possible_values(&["text", "numeric"])
                .help("Selects how the output buffer is rendered"),
        )
        .get_matches();

    let image = matches.value_of("IMAGE").unwrap();
    let input = matches.value_of("INPUT").unwrap();
    let output = matches.value_of("OUTPUT").unwrap();
    let mode: OutputMode = matches.value_of("mode").unwrap().parse().unwrap();

    match smach::run(image, input, output, mode) {
        Ok(result) => println!(
            "instructions_executed: {} ticks: {}",
            result.instructions, result.ticks
        ),
        Err(err) => eprintln!("{}", err),
    }
}
