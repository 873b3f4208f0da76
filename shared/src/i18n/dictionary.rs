//! Static UI string tables
//!
//! English is complete. Telugu and Hindi cover the dashboard, navigation and
//! forms; anything they lack falls back to English at lookup time.

use crate::types::Language;

pub type Entry = (&'static str, &'static str);

pub const EN: &[Entry] = &[
    // navigation
    ("nav.home", "Home"),
    ("nav.dashboard", "Dashboard"),
    ("nav.history", "History"),
    ("nav.community", "Community"),
    ("nav.tutorials", "Tutorials"),
    ("nav.feedback", "Feedback"),
    ("nav.profile", "Profile"),
    ("nav.about", "About"),
    ("nav.settings", "Settings"),
    ("nav.signin", "Sign In"),
    ("nav.logout", "Logout"),
    ("common.loading", "Loading..."),
    ("common.submit", "Submit"),
    // dashboard
    ("dashboard.title", "Crop Recommendation Dashboard"),
    ("dashboard.subtitle", "Choose how you want to get crop recommendations"),
    ("dashboard.autodetect.title", "Auto-Detect Location"),
    ("dashboard.autodetect.desc", "Use GPS to detect your soil type and weather automatically"),
    ("dashboard.manual.title", "Manual Input"),
    ("dashboard.manual.desc", "Enter soil nutrients and weather conditions yourself"),
    ("dashboard.detectlocation.detecting", "Detecting location..."),
    ("dashboard.detectlocation.checkpermission", "Checking location permission..."),
    ("dashboard.location.detected", "Location Detected"),
    ("dashboard.location.latitude", "Latitude"),
    ("dashboard.location.longitude", "Longitude"),
    ("dashboard.location.accuracy", "Accuracy"),
    ("dashboard.location.meters", "meters"),
    ("dashboard.soiltype", "Soil Type"),
    ("dashboard.weather", "Current Weather"),
    ("dashboard.weather.rainfall", "Rainfall"),
    ("dashboard.recommendations.title", "Recommended Crops"),
    ("dashboard.recommendations.success", "Recommendations generated successfully!"),
    ("dashboard.recommendations.empty", "No recommendations were returned. Please try again."),
    ("dashboard.recommendations.failed", "Failed to get recommendations. Please try again."),
    ("results.suitability", "Suitability"),
    ("results.price", "Market Price"),
    ("results.reason", "Why this crop"),
    // manual form
    ("manual.title", "Enter Soil & Weather Data"),
    ("manual.nitrogen", "Nitrogen (N)"),
    ("manual.phosphorus", "Phosphorus (P)"),
    ("manual.potassium", "Potassium (K)"),
    ("manual.temperature", "Temperature (°C)"),
    ("manual.humidity", "Humidity (%)"),
    ("manual.ph", "pH Level"),
    ("manual.rainfall", "Rainfall (mm)"),
    ("manual.submit", "Get Recommendations"),
    ("manual.processing", "Processing..."),
    ("manual.invalid", "Please check your inputs. Some values are outside the allowed range."),
    ("manual.test.loaded", "Test conditions loaded"),
    // location guidance
    (
        "location.error.unsupported",
        "Geolocation is not supported by your browser. Please use Manual Input instead.",
    ),
    (
        "location.error.blocked",
        "🔒 Location permission denied.\n\nTo fix:\n1. Click the lock icon in address bar\n2. Find \"Location\" permission\n3. Change to \"Allow\"\n4. Refresh page and try again",
    ),
    (
        "location.error.denied",
        "🔒 Location permission denied.\n\nTo fix:\n1. Click the location icon in your browser address bar\n2. Change permission to \"Allow\"\n3. Refresh the page and try again",
    ),
    (
        "location.error.unavailable",
        "📡 Location unavailable.\n\nPlease:\n1. Enable location services on your device\n2. Make sure GPS/WiFi is enabled\n3. Try again",
    ),
    ("location.error.timeout", "⏱️ Location request timed out. Please try again."),
    ("location.error.other", "Failed to get your location: {message}"),
    (
        "location.error.sentinel",
        "Invalid coordinates (0, 0). Please check your device location settings.",
    ),
    ("location.error.missing", "Invalid coordinates received. Please try again."),
    ("location.error.range", "Invalid coordinates detected. Please try again."),
    // history
    ("history.title", "Search History"),
    ("history.empty", "No searches yet. Your recommendations will appear here."),
    ("history.filter.all", "All"),
    ("history.filter.auto", "Auto-Detect"),
    ("history.filter.manual", "Manual"),
    ("history.total", "Total Searches"),
    ("history.mostrecommended", "Most Recommended"),
    ("history.deleted", "Search removed from history"),
    // community
    ("community.title", "Farmer Community"),
    ("community.subtitle", "Share experiences and learn from other farmers"),
    ("community.createpost", "Create Post"),
    ("community.posttitle", "Post Title"),
    ("community.postcontent", "Share your experience..."),
    ("community.postbutton", "Post"),
    ("community.nopostsyet", "No posts yet. Be the first to share!"),
    ("community.posted", "Post shared with the community!"),
    // feedback
    ("feedback.title", "Share Your Feedback"),
    ("feedback.subtitle", "Help us improve AgriSmart"),
    ("feedback.yourname", "Your Name"),
    ("feedback.youremail", "Your Email"),
    ("feedback.feedbacktype", "Feedback Type"),
    ("feedback.bug", "Bug Report"),
    ("feedback.feature", "Feature Request"),
    ("feedback.general", "General Feedback"),
    ("feedback.message", "Message"),
    ("feedback.rating", "Rating"),
    ("feedback.thankyou", "Thank you for your feedback!"),
    ("feedback.postedtocommunity", "Your feedback was also posted to the community."),
    // profile
    ("profile.title", "My Profile"),
    ("profile.name", "Name"),
    ("profile.email", "Email"),
    ("profile.phone", "Phone"),
    ("profile.location", "Location"),
    ("profile.farmSize", "Farm Size"),
    ("profile.farmType", "Farm Type"),
    ("profile.save", "Save Profile"),
    ("profile.saved", "Profile saved successfully!"),
    ("profile.notfound", "No saved profile yet."),
    // tutorials and chat
    ("tutorials.title", "Video Tutorials"),
    ("chat.title", "AgriSmart Assistant"),
    ("chat.placeholder", "Type your question..."),
    // demo session
    ("auth.signin.success", "Signed in successfully!"),
    ("auth.signup.success", "Account created successfully!"),
    ("auth.logout.success", "Logged out"),
    ("auth.error.email", "Please enter a valid email address."),
    ("auth.error.password", "Password must be at least 6 characters."),
    ("auth.error.mismatch", "Passwords do not match."),
    // settings
    ("settings.language", "Language"),
    ("settings.theme", "Theme"),
    ("settings.theme.light", "Light"),
    ("settings.theme.dark", "Dark"),
    // errors
    ("error.network", "Could not reach the AgriSmart server. Please check your connection."),
    ("error.server", "The server returned an error. Please try again."),
    ("error.payload", "The server sent an unexpected response."),
    ("error.validation", "Please check the highlighted fields."),
    ("error.storage", "Could not save to this device. Your data is kept for this session."),
    ("error.config", "The client is misconfigured."),
];

pub const TE: &[Entry] = &[
    ("nav.home", "హోమ్"),
    ("nav.dashboard", "డాష్‌బోర్డ్"),
    ("nav.history", "చరిత్ర"),
    ("nav.community", "సంఘం"),
    ("nav.tutorials", "ట్యుటోరియల్స్"),
    ("nav.feedback", "అభిప్రాయం"),
    ("nav.profile", "ప్రొఫైల్"),
    ("nav.about", "మా గురించి"),
    ("nav.settings", "సెట్టింగ్‌లు"),
    ("nav.signin", "సైన్ ఇన్"),
    ("nav.logout", "లాగ్ అవుట్"),
    ("common.loading", "లోడ్ అవుతోంది..."),
    ("common.submit", "సమర్పించండి"),
    ("dashboard.title", "పంట సిఫార్సు డాష్‌బోర్డ్"),
    ("dashboard.subtitle", "పంట సిఫార్సులు ఎలా పొందాలో ఎంచుకోండి"),
    ("dashboard.autodetect.title", "స్థానాన్ని స్వయంచాలకంగా గుర్తించండి"),
    ("dashboard.manual.title", "మాన్యువల్ ఇన్‌పుట్"),
    ("dashboard.detectlocation.detecting", "స్థానాన్ని గుర్తిస్తోంది..."),
    ("dashboard.location.detected", "స్థానం గుర్తించబడింది"),
    ("dashboard.location.latitude", "అక్షాంశం"),
    ("dashboard.location.longitude", "రేఖాంశం"),
    ("dashboard.soiltype", "నేల రకం"),
    ("dashboard.weather", "ప్రస్తుత వాతావరణం"),
    ("dashboard.weather.rainfall", "వర్షపాతం"),
    ("dashboard.recommendations.title", "సిఫార్సు చేసిన పంటలు"),
    ("dashboard.recommendations.success", "సిఫార్సులు విజయవంతంగా రూపొందించబడ్డాయి!"),
    ("results.suitability", "అనుకూలత"),
    ("results.price", "మార్కెట్ ధర"),
    ("manual.title", "నేల & వాతావరణ డేటాను నమోదు చేయండి"),
    ("manual.nitrogen", "నత్రజని (N)"),
    ("manual.phosphorus", "భాస్వరం (P)"),
    ("manual.potassium", "పొటాషియం (K)"),
    ("manual.temperature", "ఉష్ణోగ్రత (°C)"),
    ("manual.humidity", "తేమ (%)"),
    ("manual.ph", "pH స్థాయి"),
    ("manual.rainfall", "వర్షపాతం (mm)"),
    ("manual.submit", "సిఫార్సులు పొందండి"),
    ("manual.processing", "ప్రాసెస్ అవుతోంది..."),
    ("location.error.timeout", "⏱️ స్థానం అభ్యర్థన సమయం ముగిసింది. దయచేసి మళ్లీ ప్రయత్నించండి."),
    ("history.title", "శోధన చరిత్ర"),
    ("history.filter.all", "అన్నీ"),
    ("history.filter.manual", "మాన్యువల్"),
    ("community.title", "రైతు సంఘం"),
    ("community.createpost", "పోస్ట్ సృష్టించండి"),
    ("community.postbutton", "పోస్ట్ చేయండి"),
    ("feedback.title", "మీ అభిప్రాయాన్ని పంచుకోండి"),
    ("feedback.yourname", "మీ పేరు"),
    ("feedback.youremail", "మీ ఇమెయిల్"),
    ("feedback.message", "సందేశం"),
    ("feedback.rating", "రేటింగ్"),
    ("feedback.thankyou", "మీ అభిప్రాయానికి ధన్యవాదాలు!"),
    ("profile.title", "నా ప్రొఫైల్"),
    ("profile.name", "పేరు"),
    ("profile.phone", "ఫోన్"),
    ("profile.location", "స్థానం"),
    ("profile.save", "ప్రొఫైల్ సేవ్ చేయండి"),
    ("settings.language", "భాష"),
];

pub const HI: &[Entry] = &[
    ("nav.home", "होम"),
    ("nav.dashboard", "डैशबोर्ड"),
    ("nav.history", "इतिहास"),
    ("nav.community", "समुदाय"),
    ("nav.tutorials", "ट्यूटोरियल"),
    ("nav.feedback", "प्रतिक्रिया"),
    ("nav.profile", "प्रोफ़ाइल"),
    ("nav.about", "हमारे बारे में"),
    ("nav.settings", "सेटिंग्स"),
    ("nav.signin", "साइन इन"),
    ("nav.logout", "लॉग आउट"),
    ("common.loading", "लोड हो रहा है..."),
    ("common.submit", "जमा करें"),
    ("dashboard.title", "फसल सिफारिश डैशबोर्ड"),
    ("dashboard.subtitle", "चुनें कि आप फसल सिफारिशें कैसे प्राप्त करना चाहते हैं"),
    ("dashboard.autodetect.title", "स्थान स्वतः पहचानें"),
    ("dashboard.manual.title", "मैनुअल इनपुट"),
    ("dashboard.detectlocation.detecting", "स्थान का पता लगाया जा रहा है..."),
    ("dashboard.location.detected", "स्थान का पता चला"),
    ("dashboard.location.latitude", "अक्षांश"),
    ("dashboard.location.longitude", "देशांतर"),
    ("dashboard.soiltype", "मिट्टी का प्रकार"),
    ("dashboard.weather", "वर्तमान मौसम"),
    ("dashboard.weather.rainfall", "वर्षा"),
    ("dashboard.recommendations.title", "अनुशंसित फसलें"),
    ("dashboard.recommendations.success", "सिफारिशें सफलतापूर्वक तैयार की गईं!"),
    ("results.suitability", "उपयुक्तता"),
    ("results.price", "बाज़ार मूल्य"),
    ("manual.title", "मिट्टी और मौसम डेटा दर्ज करें"),
    ("manual.nitrogen", "नाइट्रोजन (N)"),
    ("manual.phosphorus", "फॉस्फोरस (P)"),
    ("manual.potassium", "पोटेशियम (K)"),
    ("manual.temperature", "तापमान (°C)"),
    ("manual.humidity", "आर्द्रता (%)"),
    ("manual.ph", "pH स्तर"),
    ("manual.rainfall", "वर्षा (mm)"),
    ("manual.submit", "सिफारिशें प्राप्त करें"),
    ("manual.processing", "प्रोसेस हो रहा है..."),
    ("location.error.timeout", "⏱️ स्थान अनुरोध का समय समाप्त हो गया। कृपया पुनः प्रयास करें।"),
    ("history.title", "खोज इतिहास"),
    ("history.filter.all", "सभी"),
    ("history.filter.manual", "मैनुअल"),
    ("community.title", "किसान समुदाय"),
    ("community.createpost", "पोस्ट बनाएं"),
    ("community.postbutton", "पोस्ट करें"),
    ("feedback.title", "अपनी प्रतिक्रिया साझा करें"),
    ("feedback.yourname", "आपका नाम"),
    ("feedback.youremail", "आपका ईमेल"),
    ("feedback.message", "संदेश"),
    ("feedback.rating", "रेटिंग"),
    ("feedback.thankyou", "आपकी प्रतिक्रिया के लिए धन्यवाद!"),
    ("profile.title", "मेरी प्रोफ़ाइल"),
    ("profile.name", "नाम"),
    ("profile.phone", "फ़ोन"),
    ("profile.location", "स्थान"),
    ("profile.save", "प्रोफ़ाइल सहेजें"),
    ("settings.language", "भाषा"),
];

/// The full table for one language
pub fn entries(language: Language) -> &'static [Entry] {
    match language {
        Language::English => EN,
        Language::Telugu => TE,
        Language::Hindi => HI,
    }
}

/// Look a key up in a single language, with no fallback
pub fn lookup(language: Language, key: &str) -> Option<&'static str> {
    entries(language)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}
