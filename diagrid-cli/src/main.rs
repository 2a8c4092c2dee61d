//! `diagrid` CLI — convert ASCII diagrams to SVG.

use std::env;
use std::fs;
use std::io::{Read, Write};
use std::process;

use diagrid_svg::{render_with_options, RenderOptions};

struct Config {
    input_file: Option<String>,
    output_file: Option<String>,
    tab_width: usize,
    render: RenderOptions,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    let data = read_input(&config);

    let canvas = match diagrid_core::parse(&data, config.tab_width) {
        Ok(canvas) => canvas,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let svg = render_with_options(&canvas, &config.render).to_string();
    write_output(&config, &svg);
}

fn parse_args(args: &[String]) -> Config {
    let mut config = Config {
        input_file: None,
        output_file: None,
        tab_width: 8,
        render: RenderOptions::default(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    config.output_file = Some(args[i].clone());
                }
            }
            "--tab-width" | "-t" => {
                i += 1;
                config.tab_width = numeric_arg(args, i, "tab width");
            }
            "--scale-x" | "-x" => {
                i += 1;
                config.render.scale_x = numeric_arg(args, i, "x scale");
            }
            "--scale-y" | "-y" => {
                i += 1;
                config.render.scale_y = numeric_arg(args, i, "y scale");
            }
            "--font" | "-f" => {
                i += 1;
                if i < args.len() {
                    config.render.font_family.clone_from(&args[i]);
                }
            }
            "--help" | "-h" => {
                println!("diagrid — ASCII diagram to SVG converter");
                println!();
                println!("Usage:");
                println!("  diagrid [input]              Convert a file (stdin when absent or -)");
                println!("  diagrid -o <file> [input]    Write SVG to a file instead of stdout");
                println!();
                println!("Options:");
                println!("  -t, --tab-width <n>   Tab stop width (default 8, 0 disables)");
                println!("  -x, --scale-x <n>     Pixels per grid column (default 9)");
                println!("  -y, --scale-y <n>     Pixels per grid row (default 16)");
                println!("  -f, --font <stack>    Font family for text");
                process::exit(0);
            }
            _ => {
                config.input_file = Some(args[i].clone());
            }
        }
        i += 1;
    }

    config
}

fn numeric_arg<T: std::str::FromStr>(args: &[String], i: usize, what: &str) -> T {
    let Some(raw) = args.get(i) else {
        eprintln!("Error: missing {what}");
        process::exit(1);
    };
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Error: invalid {what}: {raw}");
            process::exit(1);
        }
    }
}

fn read_input(config: &Config) -> Vec<u8> {
    match config.input_file.as_deref() {
        Some("-") | None => {
            let mut data = Vec::new();
            if let Err(e) = std::io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {e}");
                process::exit(1);
            }
            data
        }
        Some(file) => match fs::read(file) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading {file}: {e}");
                process::exit(1);
            }
        },
    }
}

fn write_output(config: &Config, svg: &str) {
    match config.output_file.as_deref() {
        Some(file) => {
            if let Err(e) = fs::write(file, svg) {
                eprintln!("Error writing {file}: {e}");
                process::exit(1);
            }
        }
        None => {
            let mut stdout = std::io::stdout();
            if stdout
                .write_all(svg.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .is_err()
            {
                process::exit(1);
            }
        }
    }
}
