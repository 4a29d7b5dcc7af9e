use anyhow::Context;
use clap::Parser;
use htmlq::{Document, Matcher, NodeSet};
use std::path::{Path, PathBuf};

/// Query html documents with css selectors.
#[derive(Parser, Debug)]
#[command(name = "htmlq", version, about)]
struct Cli {
	/// Css selector to match against each document.
	#[arg(env = "HTMLQ_SELECTOR")]
	selector: String,

	/// Html files, or directories of `.html` files. Reads stdin when omitted.
	paths: Vec<PathBuf>,

	/// Print this attribute of each match instead of its inner markup.
	#[arg(short, long, env = "HTMLQ_ATTRIBUTE", conflicts_with = "value")]
	attribute: Option<String>,

	/// Print the form value of each match.
	#[arg(long)]
	value: bool,

	/// Print the number of matches instead of the matches.
	#[arg(short, long)]
	count: bool,

	/// Strip leading and trailing whitespace from each printed line.
	#[arg(short, long, env = "HTMLQ_TRIM")]
	trim: bool,

	/// Raise the log level (repeatable).
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

enum Output {
	Markup,
	Attribute(String),
	Value,
}

fn main() -> anyhow::Result<()> {
	let _ = dotenv::dotenv();
	let cli = Cli::parse();
	init_logging(cli.verbose);

	let matcher = Matcher::parse(&cli.selector)?;
	let output = match (&cli.attribute, cli.value) {
		(Some(name), _) => Output::Attribute(name.clone()),
		(None, true) => Output::Value,
		(None, false) => Output::Markup,
	};
	let trim = regex::Regex::new(r"^\s*(?s)(.*?)\s*$")?;

	let documents = if cli.paths.is_empty() {
		vec![(
			"<stdin>".to_owned(),
			Document::from_reader(std::io::stdin().lock()).context("reading stdin")?,
		)]
	} else {
		let mut documents = Vec::new();
		for root in cli.paths.iter() {
			for html_path in gather_paths(root)?.into_iter() {
				log::info!("Parsing {:?}", html_path);
				let file = std::fs::File::open(&html_path)
					.with_context(|| format!("opening {}", html_path.display()))?;
				let document = Document::from_reader(std::io::BufReader::new(file))
					.with_context(|| format!("reading {}", html_path.display()))?;
				documents.push((html_path.display().to_string(), document));
			}
		}
		documents
	};

	for (name, document) in documents.iter() {
		let matches = document.root().find_with(&matcher);
		log::debug!("{name}: {} match(es)", matches.len());
		if cli.count {
			println!("{}", matches.len());
			continue;
		}
		for line in render_matches(&matches, &output)?.into_iter() {
			if cli.trim {
				println!("{}", strip_whitespace(&trim, &line));
			} else {
				println!("{line}");
			}
		}
	}

	Ok(())
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => log::LevelFilter::Warn,
		1 => log::LevelFilter::Info,
		2 => log::LevelFilter::Debug,
		_ => log::LevelFilter::Trace,
	};
	env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.init();
}

fn render_matches(matches: &NodeSet<'_>, output: &Output) -> anyhow::Result<Vec<String>> {
	let mut lines = Vec::with_capacity(matches.len());
	for node in matches.iter() {
		lines.push(match output {
			Output::Markup => node.text().context("rendering match")?,
			Output::Attribute(name) => node.attr(name),
			Output::Value => node.value(),
		});
	}
	Ok(lines)
}

fn strip_whitespace<'t>(regex: &regex::Regex, text: &'t str) -> &'t str {
	regex
		.captures(text)
		.and_then(|captures| captures.get(1))
		.map(|group| group.as_str())
		.unwrap_or(text)
}

fn gather_paths(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
	let mut htmls = vec![];
	if root.is_dir() {
		for entry in root
			.read_dir()
			.with_context(|| format!("listing {}", root.display()))?
		{
			let file_path = entry?.path();
			if is_html(&file_path) {
				htmls.push(file_path);
			}
		}
		htmls.sort();
	} else if is_html(root) {
		htmls.push(root.to_path_buf());
	} else {
		log::warn!("Skipping {:?}: not a directory or .html file", root);
	}
	Ok(htmls)
}

fn is_html(path: &Path) -> bool {
	path.is_file()
		&& path
			.extension()
			.map(|ext| ext == "html" || ext == "htm")
			.unwrap_or(false)
}
