//! # Screen Rendering
//!
//! Pure drawing: session state in, widgets out. All displayable text comes
//! from the core view projections, so nothing here computes totals or
//! captions of its own.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

use orderdesk_core::view::{cart_rows, cart_totals_line, price_caption};
use orderdesk_core::{Cart, KeypadEntry, Notice, Screen, Session};

/// Draws one frame.
///
/// Overlays are layered last: the keypad modal over the product grid, and a
/// pending notice over everything.
pub fn draw(frame: &mut Frame, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, session, chunks[0]);

    match session.screen {
        Screen::SelectCustomer => draw_customer_grid(frame, session, chunks[1]),
        Screen::SelectProduct => draw_product_screen(frame, session, chunks[1]),
        Screen::Payment => draw_payment(frame, session, chunks[1]),
    }

    draw_footer(frame, session, chunks[2]);

    if let Some(entry) = &session.keypad {
        draw_keypad(frame, entry);
    }
    if let Some(notice) = &session.notice {
        draw_notice(frame, notice);
    }
}

// =============================================================================
// Chrome
// =============================================================================

fn draw_header(frame: &mut Frame, session: &Session, area: Rect) {
    let mut spans = vec![Span::styled(
        " Orderdesk ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(customer) = &session.customer {
        spans.push(Span::raw("| Customer: "));
        spans.push(Span::styled(
            customer.name.clone(),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::raw(" "));
    }
    if let Some(slip) = &session.last_slip_number {
        spans.push(Span::raw(format!("| Last slip: {slip} ")));
    }

    let title = match session.screen {
        Screen::SelectCustomer => "Select Customer",
        Screen::SelectProduct => "Select Products",
        Screen::Payment => "Payment",
    };

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, session: &Session, area: Rect) {
    let hints = if session.notice.is_some() {
        " [Enter] ok"
    } else if session.keypad.is_some() {
        " [0-9] digit  [o] 00  [k/g/e/b] unit  [Enter] add  [c] clear  [Esc] cancel"
    } else {
        match session.screen {
            Screen::SelectCustomer => " [1-9] select customer  [q] quit",
            Screen::SelectProduct => " [1-9] select product  [p] payment  [q] quit",
            Screen::Payment => " [Enter] complete order  [Esc] back  [q] quit",
        }
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

// =============================================================================
// Screens
// =============================================================================

fn draw_customer_grid(frame: &mut Frame, session: &Session, area: Rect) {
    let lines: Vec<Line> = if session.customers.is_empty() {
        vec![Line::from(Span::styled(
            "No customers loaded",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        session
            .customers
            .iter()
            .enumerate()
            .map(|(i, customer)| grid_line(i, &customer.name))
            .collect()
    };

    let grid = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Customers"));
    frame.render_widget(grid, area);
}

fn draw_product_screen(frame: &mut Frame, session: &Session, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let lines: Vec<Line> = if session.products.is_empty() {
        vec![Line::from(Span::styled(
            "No products loaded",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        session
            .products
            .iter()
            .enumerate()
            .map(|(i, product)| grid_line(i, &product.name))
            .collect()
    };

    let grid = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Products"));
    frame.render_widget(grid, halves[0]);

    draw_cart(frame, &session.cart, halves[1]);
}

fn draw_payment(frame: &mut Frame, session: &Session, area: Rect) {
    draw_cart(frame, &session.cart, area);
}

/// One grid entry: its 1-based key in brackets, then the name.
fn grid_line(index: usize, name: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" [{}] ", index + 1),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(name.to_string()),
    ])
}

// =============================================================================
// Cart Table
// =============================================================================

fn draw_cart(frame: &mut Frame, cart: &Cart, area: Rect) {
    let rows: Vec<Row> = cart_rows(cart)
        .into_iter()
        .map(|row| {
            Row::new(vec![
                row.index.to_string(),
                row.name,
                row.quantity,
                row.unit_price,
                row.line_total,
            ])
        })
        .collect();

    let (total_quantity, total_amount) = cart_totals_line(cart);

    let widths = [
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Item", "Qty", "Price", "Total"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Order ({total_quantity} items, total {total_amount})"
        )));
    frame.render_widget(table, area);
}

// =============================================================================
// Overlays
// =============================================================================

fn draw_keypad(frame: &mut Frame, entry: &KeypadEntry) {
    let area = centered_rect(40, 9, frame.area());
    frame.render_widget(Clear, area);

    let buffer = if entry.buffer().is_empty() {
        Span::styled("-", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            entry.buffer().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(""),
        Line::from(buffer).alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            price_caption(entry.quote()),
            Style::default().fg(Color::Cyan),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "[k] kg  [g] g  [e] ea  [b] box",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
    ];

    let modal = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", entry.product().name)),
    );
    frame.render_widget(modal, area);
}

fn draw_notice(frame: &mut Frame, notice: &Notice) {
    let area = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(notice.to_string()).alignment(Alignment::Center),
        Line::from(Span::styled("[Enter] ok", Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center),
    ];

    let modal = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(modal, area);
}

/// A fixed-size rect centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect, Rect::new(30, 15, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 5);
    }
}
