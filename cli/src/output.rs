use colored::Colorize;

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn subheader(title: &str) {
    println!("{}", title.bold());
}

pub fn field(name: &str, value: &str) {
    let shown = if value.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        value.cyan().to_string()
    };
    println!("  {:<16} {}", format!("{name}:"), shown);
}

pub fn hint(msg: &str) {
    println!("{} {}", "hint:".cyan().bold(), msg.dimmed());
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn bool_str(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
