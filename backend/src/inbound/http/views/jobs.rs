//! Job pages and the due-jobs round sheet.

use crate::domain::ports::{DueJobs, JobDetail};
use crate::domain::{Address, Customer, Job, Zone};
use crate::inbound::http::flash::FlashMessage;

use super::{
    date, escape_html, frequency, frequency_weeks_input, id_option, layout, money, text,
    timestamp,
};

fn zone_options(zones: &[Zone], selected: Option<i32>) -> String {
    let mut options = String::from("<option value=\"\">No zone</option>");
    for zone in zones {
        let marker = if selected == Some(zone.id) { " selected" } else { "" };
        options.push_str(&format!(
            "<option value=\"{id}\"{marker}>{label}</option>",
            id = zone.id,
            label = escape_html(&zone.label()),
        ));
    }
    if let Some(id) = selected.filter(|id| !zones.iter().any(|zone| zone.id == *id)) {
        options.push_str(&format!(
            "<option value=\"{id}\" selected>Zone {id} (deleted)</option>"
        ));
    }
    options
}

/// Job fields shared by the add, edit, and customer "add job" forms.
pub(crate) fn job_fields_form(
    action: &str,
    existing: Option<(&Job, Option<&Address>)>,
    zones: &[Zone],
) -> String {
    let job = existing.map(|(job, _)| job);
    let address = existing.and_then(|(_, address)| address);
    let price = job
        .and_then(|job| job.price)
        .map(|price| format!("{price:.2}"))
        .unwrap_or_default();
    let last_done = job
        .and_then(|job| job.date_last_done)
        .map(|day| day.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    format!(
        "<form method=\"post\" action=\"{action}\">\
<label>Price (£) <input name=\"price\" inputmode=\"decimal\" value=\"{price}\"></label>\
<label>Every (weeks) <input name=\"frequency_weeks\" inputmode=\"numeric\" value=\"{weeks}\"></label>\
<label>Last done <input name=\"date_last_done\" type=\"date\" value=\"{last_done}\"></label>\
<label>Zone <select name=\"zone_id\">{zones}</select></label>\
<label>Payment type <input name=\"payment_type_id\" inputmode=\"numeric\" value=\"{payment}\"></label>\
<label>House number or name <input name=\"house_num_name\" value=\"{house}\"></label>\
<label>Street <input name=\"street_name\" value=\"{street}\"></label>\
<label>Postcode <input name=\"postcode\" value=\"{postcode}\"></label>\
<label>Notes <textarea name=\"info\">{info}</textarea></label>\
<button type=\"submit\">Save job</button></form>",
        action = escape_html(action),
        weeks = frequency_weeks_input(job.and_then(|job| job.frequency)),
        zones = zone_options(zones, job.and_then(|job| job.zone_id)),
        payment = id_option(job.and_then(|job| job.payment_type_id)),
        house = text(address.and_then(|address| address.house_num_name.as_deref())),
        street = text(address.and_then(|address| address.street_name.as_deref())),
        postcode = text(address.and_then(|address| address.postcode.as_deref())),
        info = text(job.and_then(|job| job.info.as_deref())),
    )
}

/// Add form when `detail` is `None`, edit form otherwise.
pub fn job_form(detail: Option<&JobDetail>, zones: &[Zone], flashes: &[FlashMessage]) -> String {
    match detail {
        Some(detail) => {
            let action = format!("/jobs/{}/edit", detail.job.id);
            let form = job_fields_form(
                &action,
                Some((&detail.job, detail.address.as_ref())),
                zones,
            );
            layout(&format!("Edit job #{}", detail.job.id), flashes, &form)
        }
        None => layout("Add job", flashes, &job_fields_form("/jobs/add", None, zones)),
    }
}

fn complete_button(job_id: i32, next: &str) -> String {
    format!(
        "<form class=\"inline\" method=\"post\" action=\"/jobs/{job_id}/complete\">\
<input type=\"hidden\" name=\"next\" value=\"{next}\"><button type=\"submit\">Done</button></form>",
        next = escape_html(next),
    )
}

pub fn jobs_list(jobs: &[Job], flashes: &[FlashMessage]) -> String {
    let mut body = String::from("<p><a href=\"/jobs/add\">Add a job</a></p>");
    if jobs.is_empty() {
        body.push_str("<p>No jobs yet.</p>");
        return layout("Jobs", flashes, &body);
    }
    let rows: String = jobs
        .iter()
        .map(|job| {
            format!(
                "<tr><td><a href=\"/jobs/{id}\">#{id}</a></td><td>{price}</td><td>{freq}</td>\
<td>{next}</td><td>{customer}</td><td>{info}</td></tr>",
                id = job.id,
                price = money(job.price),
                freq = frequency(job.frequency),
                next = timestamp(job.date_next_due),
                customer = job
                    .customer_id
                    .map(|id| format!("<a href=\"/customers/{id}\">#{id}</a>"))
                    .unwrap_or_else(|| "-".to_owned()),
                info = text(job.info.as_deref()),
            )
        })
        .collect();
    body.push_str(&format!(
        "<table><thead><tr><th>Job</th><th>Price</th><th>Frequency</th><th>Next due</th>\
<th>Customer</th><th>Notes</th></tr></thead><tbody>{rows}</tbody></table>"
    ));
    layout("Jobs", flashes, &body)
}

pub fn job_detail(detail: &JobDetail, flashes: &[FlashMessage]) -> String {
    let job = &detail.job;
    let customer = match &detail.customer {
        Some(customer) => format!(
            "<a href=\"/customers/{}\">{}</a>",
            customer.id,
            escape_html(&customer.display_name())
        ),
        None => format!("None <a href=\"/jobs/{}/add-customer\">Attach a customer</a>", job.id),
    };
    let zone = match (&detail.zone, job.zone_id) {
        (Some(zone), _) => escape_html(&zone.label()),
        (None, Some(id)) => format!("Zone {id} (deleted)"),
        (None, None) => "No zone".to_owned(),
    };
    let address = detail
        .address
        .as_ref()
        .map(|address| escape_html(&address.summary()))
        .unwrap_or_else(|| "-".to_owned());

    let history = if detail.history.is_empty() {
        "<p>Not completed yet.</p>".to_owned()
    } else {
        let rows: String = detail
            .history
            .iter()
            .map(|entry| {
                let paid = if entry.paid {
                    "Paid".to_owned()
                } else {
                    format!(
                        "Unpaid <form class=\"inline\" method=\"post\" \
action=\"/payments/{}/mark-paid\"><button type=\"submit\">Mark paid</button></form>",
                        entry.id
                    )
                };
                format!(
                    "<tr><td>{}</td><td>{paid}</td></tr>",
                    timestamp(entry.completed_at)
                )
            })
            .collect();
        format!(
            "<table><thead><tr><th>Completed</th><th>Payment</th></tr></thead>\
<tbody>{rows}</tbody></table>"
        )
    };

    let body = format!(
        "<dl><dt>Customer</dt><dd>{customer}</dd><dt>Address</dt><dd>{address}</dd>\
<dt>Zone</dt><dd>{zone}</dd><dt>Price</dt><dd>{price}</dd><dt>Frequency</dt><dd>{freq}</dd>\
<dt>Last done</dt><dd>{last}</dd><dt>Next due</dt><dd>{next}</dd><dt>Notes</dt><dd>{info}</dd></dl>\
{done} <a href=\"/jobs/{id}/edit\">Edit</a> \
<form class=\"inline\" method=\"post\" action=\"/jobs/{id}/delete\">\
<button type=\"submit\">Delete job</button></form><h2>History</h2>{history}",
        id = job.id,
        price = money(job.price),
        freq = frequency(job.frequency),
        last = date(job.date_last_done),
        next = timestamp(job.date_next_due),
        info = text(job.info.as_deref()),
        done = complete_button(job.id, &format!("/jobs/{}", job.id)),
    );
    layout(&format!("Job #{}", job.id), flashes, &body)
}

pub fn attach_customer_form(job: &Job, customers: &[Customer], flashes: &[FlashMessage]) -> String {
    let options: String = customers
        .iter()
        .map(|customer| {
            format!(
                "<option value=\"{}\">{}</option>",
                customer.id,
                escape_html(&customer.display_name())
            )
        })
        .collect();
    let body = format!(
        "<form method=\"post\" action=\"/jobs/{id}/add-customer\">\
<label>Customer <select name=\"customer_id\" required>{options}</select></label>\
<button type=\"submit\">Attach</button></form><p><a href=\"/jobs/{id}\">Back to job</a></p>",
        id = job.id,
    );
    layout(&format!("Attach a customer to job #{}", job.id), flashes, &body)
}

pub fn due_jobs(due: &DueJobs, flashes: &[FlashMessage]) -> String {
    let reference = due.reference.format("%Y-%m-%d").to_string();
    let mut back_to = format!("/jobs/due?date={reference}");
    if let Some(zone_id) = due.zone_id {
        back_to.push_str(&format!("&zone={zone_id}"));
    }

    let mut body = format!(
        "<form method=\"get\" action=\"/jobs/due\">\
<label>Due on or before <input name=\"date\" type=\"date\" value=\"{reference}\"></label>\
<label>Zone <select name=\"zone\">{zones}</select></label>\
<button type=\"submit\">Show</button></form>",
        zones = zone_options(&due.zones, due.zone_id),
    );

    if due.groups.is_empty() {
        body.push_str("<p>Nothing due.</p>");
    }
    for group in &due.groups {
        let rows: String = group
            .jobs
            .iter()
            .map(|job| {
                format!(
                    "<tr><td><a href=\"/jobs/{id}\">#{id}</a></td><td>{price}</td><td>{next}</td>\
<td>{info}</td><td>{done}</td></tr>",
                    id = job.id,
                    price = money(job.price),
                    next = timestamp(job.date_next_due),
                    info = text(job.info.as_deref()),
                    done = complete_button(job.id, &back_to),
                )
            })
            .collect();
        body.push_str(&format!(
            "<h2>{label}</h2><table><thead><tr><th>Job</th><th>Price</th><th>Due</th>\
<th>Notes</th><th></th></tr></thead><tbody>{rows}</tbody></table>",
            label = escape_html(&group.label),
        ));
    }
    layout("Due jobs", flashes, &body)
}
