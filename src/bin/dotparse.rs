//! This is the command line tool that loads '.dot' files, parses them, and
//! prints the resulting AST.

use clap::{Arg, ArgAction, Command};
use dotparse::ast::Graph;
use dotparse::parser::printer::ast_to_string;
use dotparse::parser::visit::GraphStats;
use std::fs;
use std::process::ExitCode;

struct CLIOptions {
    dump_ast: bool,
    dump_json: bool,
    print_stats: bool,
    debug_mode: bool,
    input_path: String,
}

impl CLIOptions {
    pub fn new() -> Self {
        Self {
            dump_ast: false,
            dump_json: false,
            print_stats: false,
            debug_mode: false,
            input_path: String::new(),
        }
    }
}

fn print_stats(graphs: &[Graph]) {
    for (i, g) in graphs.iter().enumerate() {
        let stats = GraphStats::from_graph(g);
        let name = g.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        println!(
            "#{} {}: {} node stmts, {} edge stmts ({} edges), {} attr stmts, \
             {} assignments, {} subgraphs",
            i,
            name,
            stats.node_stmts,
            stats.edge_stmts,
            stats.edges,
            stats.attr_stmts,
            stats.assignments,
            stats.subgraphs
        );
    }
}

fn run(options: &CLIOptions) -> Result<(), String> {
    let contents = fs::read_to_string(&options.input_path)
        .map_err(|err| format!("Can't open {}: {}", options.input_path, err))?;

    let graphs = match dotparse::parse(&contents) {
        Ok(graphs) => graphs,
        Err(err) => {
            eprintln!("{}", err.annotate(&contents));
            return Err(format!("Could not parse {}", options.input_path));
        }
    };
    log::info!("Parsed {} graph(s) from {}", graphs.len(), options.input_path);

    if options.dump_json {
        let json = serde_json::to_string_pretty(&graphs)
            .map_err(|err| format!("Could not serialize the AST: {}", err))?;
        println!("{}", json);
    }
    if options.dump_ast {
        for g in &graphs {
            print!("{}", ast_to_string(g));
        }
    }
    if options.print_stats {
        print_stats(&graphs);
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = Command::new("dotparse")
        .version("0.1.0")
        .arg(
            Arg::new("d")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enables debug logging"),
        )
        .arg(
            Arg::new("a")
                .short('a')
                .long("ast")
                .action(ArgAction::SetTrue)
                .help("Dump the graph AST (the default)"),
        )
        .arg(
            Arg::new("j")
                .short('j')
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Dump the graph AST as JSON"),
        )
        .arg(
            Arg::new("s")
                .short('s')
                .long("stats")
                .action(ArgAction::SetTrue)
                .help("Print statement counts for each graph"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    let mut cli = CLIOptions::new();
    cli.debug_mode = matches.get_flag("d");
    cli.dump_ast = matches.get_flag("a");
    cli.dump_json = matches.get_flag("j");
    cli.print_stats = matches.get_flag("s");
    if !cli.dump_json && !cli.print_stats {
        cli.dump_ast = true;
    }
    if let Some(path) = matches.get_one::<String>("INPUT") {
        cli.input_path = path.clone();
    }

    let mut logger = env_logger::builder();
    logger.format_timestamp(None);
    if cli.debug_mode {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
