//! Page fixtures shared by the integration tests

pub const TITLE: &str = "Handmade Ceramic Mugs and Bowls | Example Pottery";

pub const DESCRIPTION: &str = "Shop handmade ceramic mugs, bowls and plates thrown in our small studio. \
Every piece is glazed by hand and fired in small batches to last.";

const SENTENCE: &str = "Each piece starts as a lump of local clay that we wedge, throw and trim \
by hand before it dries slowly on open shelves.";

/// A page that passes every scored check
///
/// `external_rel` is placed on the one external link, e.g. `rel="nofollow"`.
pub fn good_page(external_rel: &str) -> String {
    let paragraph = format!("<p>{}</p>", [SENTENCE; 5].join(" "));

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <meta name="description" content="{description}">
  <link rel="canonical" href="https://example.com/">
  <link rel="preconnect" href="https://cdn.example.com">
  <link rel="stylesheet" href="/site.css">
  <script src="/app.js" defer></script>
  <script type="application/ld+json">
    {{"@context": "https://schema.org", "@type": "Organization", "name": "Example Pottery"}}
  </script>
</head>
<body>
  <a href="#main">Skip to content</a>
  <nav aria-label="Main"><a href="/shop">Shop</a> <a href="/about">About</a></nav>
  <main id="main">
    <h1>Handmade ceramics</h1>
    <h2>Mugs</h2>
    {paragraph}
    <img src="/mug.jpg" alt="Blue glazed mug" width="400" height="300">
    <h2>Bowls</h2>
    {paragraph}
    <h3>Care</h3>
    {paragraph}
    <ul><li>Dishwasher safe</li><li>Oven safe</li></ul>
    <a href="https://partner.example.org/" {external_rel}>Our clay supplier</a>
    <form>
      <label for="email">Email</label>
      <input id="email" type="email" name="email">
      <button type="submit">Subscribe</button>
    </form>
  </main>
</body>
</html>"##,
        title = TITLE,
        description = DESCRIPTION,
        paragraph = paragraph,
        external_rel = external_rel,
    )
}

/// A bare document with nothing in it
pub const EMPTY_PAGE: &str = "<html><body></body></html>";
