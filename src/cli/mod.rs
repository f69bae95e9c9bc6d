//! Line-oriented front-end used with `--no-tui`.

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::catalog::{Dish, format_cents};
use crate::storefront::Storefront;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Search(String),
    Category(Option<String>),
    Clear,
    Add(String),
    Remove(String),
    Quantity(String, u32),
    Cart,
    Login { email: String, password: String },
    Logout,
    WhoAmI,
    LateNight,
    Quit,
    Usage(&'static str),
    Unknown(String),
}

pub const HELP: &str = "/help                     Show help
/show                     Show the current dish lists
/search <term>            Search dish name, description and restaurant
/category <slug>|none     Filter by category
/clear                    Clear search and category
/add <dish-id>            Add a dish to the cart
/remove <dish-id>         Remove a dish from the cart
/qty <dish-id> <n>        Set a cart quantity (0 removes)
/cart                     Show the cart
/login <email> <password> Sign in
/logout                   Sign out
/whoami                   Show the signed-in user
/late                     Late-night restaurants
/quit                     Quit";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_start();
    // `raw` keeps everything after the separator space; search terms are
    // taken verbatim so the term policy decides how whitespace counts.
    let (head, raw) = match line.split_once(' ') {
        Some((h, r)) => (h, r),
        None => (line.trim_end(), ""),
    };
    let rest = raw.trim();
    match head {
        "/help" => Command::Help,
        "/show" => Command::Show,
        "/search" => Command::Search(raw.to_string()),
        "/category" => match rest {
            "" => Command::Usage("usage: /category <slug>|none"),
            "none" => Command::Category(None),
            slug => Command::Category(Some(slug.to_string())),
        },
        "/clear" => Command::Clear,
        "/add" if !rest.is_empty() => Command::Add(rest.to_string()),
        "/add" => Command::Usage("usage: /add <dish-id>"),
        "/remove" if !rest.is_empty() => Command::Remove(rest.to_string()),
        "/remove" => Command::Usage("usage: /remove <dish-id>"),
        "/qty" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next().and_then(|n| n.parse::<u32>().ok())) {
                (Some(id), Some(n)) => Command::Quantity(id.to_string(), n),
                _ => Command::Usage("usage: /qty <dish-id> <n>"),
            }
        }
        "/cart" => Command::Cart,
        "/login" => match rest.split_once(' ') {
            Some((email, password)) if !password.trim().is_empty() => Command::Login {
                email: email.to_string(),
                password: password.trim().to_string(),
            },
            _ => Command::Usage("usage: /login <email> <password>"),
        },
        "/logout" => Command::Logout,
        "/whoami" => Command::WhoAmI,
        "/late" => Command::LateNight,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Unknown(line.trim_end().to_string()),
    }
}

pub fn format_dish(dish: &Dish) -> String {
    let popular = if dish.is_popular { "  (popular)" } else { "" };
    format!(
        "  [{}] {} - {}  {}  ★{:.1}  {} min{}",
        dish.id,
        dish.name,
        dish.restaurant,
        dish.price_label(),
        dish.rating,
        dish.prep_minutes,
        popular
    )
}

fn write_view(sf: &mut Storefront, out: &mut impl Write) -> Result<()> {
    for section in &sf.view().sections {
        writeln!(out, "== {} ({}) ==", section.title, section.dishes.len())?;
        if section.dishes.is_empty() {
            writeln!(out, "  No dishes found")?;
        }
        for dish in &section.dishes {
            writeln!(out, "{}", format_dish(dish))?;
        }
    }
    Ok(())
}

fn write_cart(sf: &Storefront, out: &mut impl Write) -> Result<()> {
    let cart = sf.cart();
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }
    for line in cart.items() {
        writeln!(
            out,
            "  {} x{}  {}",
            line.name,
            line.quantity,
            format_cents(line.total_cents())
        )?;
    }
    writeln!(
        out,
        "  {} items, subtotal {}",
        cart.item_count(),
        format_cents(cart.subtotal_cents())
    )?;
    Ok(())
}

/// Runs one command. Returns `true` when the loop should stop.
pub fn execute(sf: &mut Storefront, cmd: Command, out: &mut impl Write) -> Result<bool> {
    match cmd {
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Show => write_view(sf, out)?,
        Command::Search(term) => {
            sf.set_search_term(term);
            write_view(sf, out)?;
        }
        Command::Category(slug) => {
            sf.select_category(slug.as_deref());
            write_view(sf, out)?;
        }
        Command::Clear => {
            sf.clear_filters();
            write_view(sf, out)?;
        }
        Command::Add(id) => match sf.add_to_cart(&id) {
            Ok(q) => writeln!(out, "Added {id} (quantity {q})")?,
            Err(e) => writeln!(out, "add error: {e}")?,
        },
        Command::Remove(id) => match sf.remove_from_cart(&id) {
            Ok(()) => writeln!(out, "Removed {id}")?,
            Err(e) => writeln!(out, "remove error: {e}")?,
        },
        Command::Quantity(id, n) => match sf.set_cart_quantity(&id, n) {
            Ok(()) => writeln!(out, "Set {id} to {n}")?,
            Err(e) => writeln!(out, "quantity error: {e}")?,
        },
        Command::Cart => write_cart(sf, out)?,
        Command::Login { email, password } => match sf.login(&email, &password) {
            Ok(user) => writeln!(out, "Welcome, {}", user.name)?,
            Err(e) => writeln!(out, "login error: {e}")?,
        },
        Command::Logout => match sf.logout() {
            Some(user) => writeln!(out, "Goodbye, {}", user.name)?,
            None => writeln!(out, "Not signed in")?,
        },
        Command::WhoAmI => match sf.current_user() {
            Some(user) => writeln!(out, "{} <{}>", user.name, user.email)?,
            None => writeln!(out, "Not signed in")?,
        },
        Command::LateNight => {
            writeln!(out, "== Late Night Cravings ==")?;
            for r in sf.late_night_restaurants() {
                writeln!(
                    out,
                    "  {} ({})  ★{:.1}  {}  open until {}",
                    r.name, r.cuisine, r.rating, r.delivery_time, r.open_until
                )?;
            }
        }
        Command::Quit => return Ok(true),
        Command::Usage(usage) => writeln!(out, "{usage}")?,
        Command::Unknown(line) => writeln!(out, "Unknown command: {line} (try /help)")?,
    }
    Ok(false)
}

pub fn run(sf: &mut Storefront, input: impl BufRead, mut out: impl Write) -> Result<()> {
    writeln!(out, "SB Foods (CLI) - type /help for commands")?;
    write_view(sf, &mut out)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if execute(sf, parse_command(&line), &mut out)? {
            break;
        }
        out.flush()?;
    }
    Ok(())
}
