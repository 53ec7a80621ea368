//! Inspect a few elements of a login page and print ranked locators.
//!
//! Run with: `cargo run --example inspect_demo`

use pinpoint::prelude::*;

const PAGE: &str = r#"
<html>
  <body>
    <nav><ul><li>Home</li><li>Account</li></ul></nav>
    <form class="login-form">
      <label for="email">Email</label>
      <input id="email" name="email" type="email">
      <input name="password" type="password">
      <button class="btn css-1x9k2p" data-testid="login">Sign in</button>
      <button aria-label="Close dialog">X</button>
    </form>
  </body>
</html>
"#;

fn main() -> PinpointResult<()> {
    let page = HtmlPage::parse(PAGE);
    let doc = page.document();
    let engine = LocatorEngine::default();
    let mut history = LocatorHistory::default();

    for target in ["#email", "input[type=password]", "[data-testid=login]", "[aria-label]", "li"] {
        let element = doc
            .query_selector(target)?
            .ok_or_else(|| PinpointError::not_found(target))?;
        let data = engine.inspect(&element, &doc, "https://example.com/login")?;

        println!("{target}  <{}>", data.element_info.tag_name);
        for strategy in &data.strategies {
            let flags = match (strategy.is_unique, strategy.is_stable) {
                (true, true) => "unique, stable",
                (true, false) => "unique",
                (false, true) => "stable",
                (false, false) => "",
            };
            println!("  {:<60} {flags}", strategy.to_string());
        }
        for warning in data.strategies.iter().flat_map(|s| &s.confidence.warnings) {
            println!("  ! {warning}");
        }

        let snapshot = engine.aria_snapshot(&element, &doc)?;
        println!(
            "  aria: role={:?} name={:?} hierarchy={:?}\n",
            snapshot.role, snapshot.accessible_name, snapshot.hierarchy
        );
        history.receive(data);
    }

    println!("history holds {} record(s)", history.len());
    Ok(())
}
