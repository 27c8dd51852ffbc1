//! Documents seeded into the store.

/// Opened when the store is empty. Shows every construct of the dialect.
pub const WELCOME: &str = r"# Heading 1
## Heading 2
### Heading 3

This is a **bold paragraph**, *italic* and ***bold italic***
still the same paragraph, but another line


And this is a new paragraph. Markers work in**SI**DE wo*r*ds too.

Here is another __bold__ and _italic_  text.

Literal markers need a backslash: \* and then \* and also \_

bold stars ** \*\*\*\_\_\*\*\_ ** and underscores

and here is a [link](https://en.wikipedia.org/wiki/Pembroke_Welsh_Corgi) to a page about corgis and a picture too

![corgi](https://i.imgur.com/nP3SZ0j.jpg)

He is ~~grumpy~~ lovely, isn't he?

a struck-out ~~\~~~ tilde
";

/// Added by `mdpad files tutorial` and the serve API.
pub const TUTORIAL: &str = r"# Tutorial
## Syntax

Headings start with one to three # characters and a space
**bold** or __bold__ with spaces around it
*italic* or _italic_ with spaces around it
~~strikethrough~~

Lines that start with a letter and follow each other form one paragraph. End a line with two spaces or a backslash to break it.

[Visible text](https://example.com) makes a link, ![Hover text](https://example.com/image.png) makes an image.

Put a backslash before *, _ or ~ to keep it as a literal character.

## Command line

mdpad files list shows every stored document
mdpad files new, rename and delete manage them
mdpad serve opens a live preview in the browser

Documents are saved after every change.
";
