//! Dashboard and customer pages.

use crate::domain::ports::{CustomerDetail, DashboardSummary};
use crate::domain::{Address, Customer, Zone};
use crate::inbound::http::flash::FlashMessage;

use super::{date, escape_html, frequency, layout, money, text, timestamp};

fn customer_row(customer: &Customer) -> String {
    format!(
        "<tr><td><a href=\"/customers/{id}\">{name}</a></td><td>{email}</td><td>{phone}</td>\
<td>{created}</td></tr>",
        id = customer.id,
        name = escape_html(&customer.display_name()),
        email = text(customer.email.as_deref()),
        phone = text(customer.telephone.as_deref()),
        created = timestamp(customer.created_at),
    )
}

fn customer_table(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "<p>No customers yet.</p>".to_owned();
    }
    let rows: String = customers.iter().map(customer_row).collect();
    format!(
        "<table><thead><tr><th>Name</th><th>Email</th><th>Telephone</th><th>Added</th></tr>\
</thead><tbody>{rows}</tbody></table>"
    )
}

pub fn dashboard(summary: &DashboardSummary, flashes: &[FlashMessage]) -> String {
    let body = format!(
        "<p>{count} customers on the books.</p><h2>Recently added</h2>{table}\
<p><a href=\"/customers/add\">Add a customer</a> | <a href=\"/jobs/due\">Today's round</a></p>",
        count = summary.customer_count,
        table = customer_table(&summary.recent_customers),
    );
    layout("Dashboard", flashes, &body)
}

pub fn customers_list(customers: &[Customer], flashes: &[FlashMessage]) -> String {
    let body = format!(
        "<p><a href=\"/customers/add\">Add a customer</a></p>{}",
        customer_table(customers)
    );
    layout("Customers", flashes, &body)
}

/// Add form when `customer` is `None`, edit form (with invoice address) otherwise.
pub fn customer_form(
    customer: Option<&Customer>,
    invoice_address: Option<&Address>,
    flashes: &[FlashMessage],
) -> String {
    let field = |value: Option<&String>| text(value.map(String::as_str));
    let (title, action) = match customer {
        Some(existing) => ("Edit customer", format!("/customers/{}/edit", existing.id)),
        None => ("Add customer", "/customers/add".to_owned()),
    };
    let mut body = format!(
        "<form method=\"post\" action=\"{action}\">\
<label>Forename <input name=\"forename\" required value=\"{forename}\"></label>\
<label>Surname <input name=\"surname\" value=\"{surname}\"></label>\
<label>Email <input name=\"email\" type=\"email\" value=\"{email}\"></label>\
<label>Telephone <input name=\"telephone\" inputmode=\"numeric\" value=\"{telephone}\"></label>\
<button type=\"submit\">Save</button></form>",
        forename = field(customer.and_then(|c| c.forename.as_ref())),
        surname = field(customer.and_then(|c| c.surname.as_ref())),
        email = field(customer.and_then(|c| c.email.as_ref())),
        telephone = field(customer.and_then(|c| c.telephone.as_ref())),
    );

    if let Some(existing) = customer {
        let current = invoice_address
            .map(|address| escape_html(&address.summary()))
            .unwrap_or_else(|| "None set.".to_owned());
        body.push_str(&format!(
            "<h2>Invoice address</h2><p>{current}</p>\
<form method=\"post\" action=\"/customers/{id}/invoice-address/add\">\
<label>House number or name <input name=\"house_num_name\" required></label>\
<label>Street <input name=\"street_name\" required></label>\
<label>Postcode <input name=\"postcode\"></label>\
<button type=\"submit\">Set invoice address</button></form>",
            id = existing.id,
        ));
    }
    layout(title, flashes, &body)
}

pub fn customer_detail(
    detail: &CustomerDetail,
    zones: &[Zone],
    flashes: &[FlashMessage],
) -> String {
    let customer = &detail.customer;
    let invoice = detail
        .invoice_address
        .as_ref()
        .map(|address| escape_html(&address.summary()))
        .unwrap_or_else(|| "None set.".to_owned());

    let jobs = if detail.jobs.is_empty() {
        "<p>No jobs for this customer.</p>".to_owned()
    } else {
        let rows: String = detail
            .jobs
            .iter()
            .map(|job| {
                format!(
                    "<tr><td><a href=\"/jobs/{id}\">#{id}</a></td><td>{price}</td><td>{freq}</td>\
<td>{last}</td><td>{next}</td></tr>",
                    id = job.id,
                    price = money(job.price),
                    freq = frequency(job.frequency),
                    last = date(job.date_last_done),
                    next = timestamp(job.date_next_due),
                )
            })
            .collect();
        format!(
            "<table><thead><tr><th>Job</th><th>Price</th><th>Frequency</th><th>Last done</th>\
<th>Next due</th></tr></thead><tbody>{rows}</tbody></table>"
        )
    };

    let body = format!(
        "<dl><dt>Email</dt><dd>{email}</dd><dt>Telephone</dt><dd>{phone}</dd>\
<dt>Invoice address</dt><dd>{invoice}</dd><dt>Added</dt><dd>{created}</dd></dl>\
<p><a href=\"/customers/{id}/edit\">Edit</a></p>\
<form class=\"inline\" method=\"post\" action=\"/customers/{id}/delete\">\
<button type=\"submit\">Delete customer</button></form>\
<h2>Jobs</h2>{jobs}<h2>Add a job</h2>{form}",
        id = customer.id,
        email = text(customer.email.as_deref()),
        phone = text(customer.telephone.as_deref()),
        created = timestamp(customer.created_at),
        form = super::jobs::job_fields_form(&format!("/customers/{}/jobs/add", customer.id), None, zones),
    );
    layout(&customer.display_name(), flashes, &body)
}
