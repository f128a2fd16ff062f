//! Recommendation catalog
//!
//! Fixed advice text per condition. Keys are matched case-insensitively.

const FALLBACK: &str = "• Rest, hydrate, and monitor symptoms closely.<br>\
                        • Visit a healthcare professional if you feel unwell.";

const RECOMMENDATIONS: &[(&str, &str)] = &[
    (
        "common cold",
        "• Rest and drink plenty of warm fluids.<br>\
         • Inhale steam to relieve nasal congestion.<br>\
         • Use saline nasal drops if nose is blocked.<br>\
         • Avoid cold drinks and dust exposure.<br>\
         • Usually resolves within a week.",
    ),
    (
        "influenza",
        "• Get complete bed rest and stay warm.<br>\
         • Drink fluids frequently to avoid dehydration.<br>\
         • Take prescribed antiviral medication if advised.<br>\
         • Avoid public places until fever subsides.<br>\
         • Consult a doctor if symptoms persist beyond 5 days.",
    ),
    (
        "gastroenteritis",
        "• Drink Oral Rehydration Solution (ORS) to replace lost fluids.<br>\
         • Avoid milk, spicy, and oily foods.<br>\
         • Eat bland items like rice, toast, and bananas.<br>\
         • Wash hands thoroughly to prevent reinfection.<br>\
         • See a doctor if vomiting persists or blood appears in stool.",
    ),
    (
        "migraine",
        "• Rest in a dark and quiet room.<br>\
         • Apply a cold compress to your forehead.<br>\
         • Stay hydrated and maintain consistent sleep.<br>\
         • Avoid strong smells, caffeine, and loud noise.<br>\
         • Consult a neurologist if migraines are frequent.",
    ),
    (
        "hypertension emergency",
        "🚨 Medical emergency!<br>\
         • Sit calmly and avoid exertion.<br>\
         • Do not take extra doses of medication unless prescribed.<br>\
         • Get immediate hospital evaluation.<br>\
         • Monitor blood pressure continuously until help arrives.",
    ),
    (
        "myocardial infarction",
        "🚨 Suspected heart attack!<br>\
         • Call emergency services immediately.<br>\
         • Chew aspirin if prescribed by your doctor.<br>\
         • Sit down and stay calm.<br>\
         • Do NOT drive yourself to the hospital.",
    ),
    (
        "allergic reaction",
        "• Identify and avoid the triggering allergen.<br>\
         • Take an antihistamine (e.g., cetirizine) if mild.<br>\
         • If swelling or breathing issues occur, use epinephrine if prescribed.<br>\
         • Visit an emergency room if symptoms worsen.",
    ),
    (
        "deep vein thrombosis",
        "• Avoid sitting for long periods.<br>\
         • Keep your leg elevated when resting.<br>\
         • Do not massage the swollen area.<br>\
         • Consult a doctor for ultrasound and medication.<br>\
         • Regularly move or stretch if you sit for long hours.",
    ),
    (
        "covid-19",
        "• Isolate yourself immediately to prevent transmission.<br>\
         • Monitor oxygen saturation and temperature.<br>\
         • Drink warm fluids and get adequate rest.<br>\
         • Seek medical attention if SpO2 < 94%.<br>\
         • Follow public health guidelines for quarantine.",
    ),
    (
        "conjunctivitis",
        "• Wash hands frequently and avoid touching your eyes.<br>\
         • Use antibiotic or lubricating eye drops as prescribed.<br>\
         • Do not share towels, makeup, or contact lenses.<br>\
         • Avoid bright light and rest your eyes.<br>\
         • Usually resolves within 3 to 5 days.",
    ),
];

/// Advice for a condition label, or general advice when the label is unknown.
pub fn lookup(condition: &str) -> &'static str {
    let key = condition.trim().to_lowercase();
    RECOMMENDATIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(FALLBACK, |(_, text)| *text)
}
