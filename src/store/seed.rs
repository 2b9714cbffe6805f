//! Fixed default data sets. The student seed is installed (and immediately
//! persisted) on first launch or whenever the snapshot is unusable; the
//! request, staff, and menu seeds are installed on every launch because those
//! collections intentionally do not persist.

use crate::models::{
    Hostel, HostelRequest, MenuDay, RequestKind, RequestStatus, StaffMember, StudentRecord,
};

fn student(
    id: &str,
    name: &str,
    year: &str,
    room: &str,
    contact: &str,
    hostel: Hostel,
    parent: &str,
    address: &str,
) -> StudentRecord {
    StudentRecord {
        id: id.to_string(),
        name: name.to_string(),
        year: year.to_string(),
        room: room.to_string(),
        contact: contact.to_string(),
        hostel,
        parent: parent.to_string(),
        address: address.to_string(),
    }
}

/// The four residents every fresh installation starts with.
pub fn default_students() -> Vec<StudentRecord> {
    vec![
        student(
            "S1001",
            "Alok Sharma",
            "1st",
            "101A",
            "9876543210",
            Hostel::Boys,
            "Ramesh Sharma",
            "123, Sector 15, Dwarka, New Delhi, India",
        ),
        student(
            "S2005",
            "Priya Singh",
            "2nd",
            "205",
            "9988776655",
            Hostel::Girls,
            "Anita Singh",
            "45B, Shivaji Nagar, Pune, India",
        ),
        student(
            "S3010",
            "Vivek K.",
            "3rd",
            "310",
            "9000111222",
            Hostel::Boys,
            "Kumar Das",
            "78/2, Salt Lake, Kolkata, India",
        ),
        student(
            "S1015",
            "Neha Reddy",
            "1st",
            "115B",
            "9123456789",
            Hostel::Girls,
            "Srinivas Reddy",
            "11A, Jubilee Hills, Hyderabad, India",
        ),
    ]
}

/// Requests and feedback waiting in the admin inbox at launch.
pub fn default_requests() -> Vec<HostelRequest> {
    vec![
        HostelRequest {
            student: "Alok Sharma".to_string(),
            kind: RequestKind::Leave {
                dates: "12/01 - 15/01".to_string(),
                reason: "Family event".to_string(),
                needs_proof: false,
            },
            status: RequestStatus::Pending,
        },
        HostelRequest {
            student: "Priya Singh".to_string(),
            kind: RequestKind::Leave {
                dates: "10/01".to_string(),
                reason: "Medical checkup".to_string(),
                needs_proof: true,
            },
            status: RequestStatus::Approved,
        },
        HostelRequest {
            student: "Vivek K.".to_string(),
            kind: RequestKind::ChangeRoom {
                reason: "Noise complaint (Room 310)".to_string(),
            },
            status: RequestStatus::New,
        },
        HostelRequest {
            student: "Neha Reddy".to_string(),
            kind: RequestKind::Feedback {
                message: "Warden contact hours are too short.".to_string(),
            },
            status: RequestStatus::New,
        },
    ]
}

/// Staff roster shown on the admin side.
pub fn default_staff() -> Vec<StaffMember> {
    vec![
        StaffMember {
            name: "Mr. Rohit Kumar".to_string(),
            role: "Head Guard".to_string(),
            hostel: Hostel::Boys,
            contact: "9000123456".to_string(),
        },
        StaffMember {
            name: "Ms. Geeta Devi".to_string(),
            role: "Warden Assistant".to_string(),
            hostel: Hostel::Girls,
            contact: "9000654321".to_string(),
        },
    ]
}

fn menu_day(day: &str, breakfast: &str, lunch: &str, dinner: &str) -> MenuDay {
    MenuDay {
        day: day.to_string(),
        breakfast: breakfast.to_string(),
        lunch: lunch.to_string(),
        dinner: dinner.to_string(),
    }
}

/// The full weekly menu, editable on the admin side and read-only for
/// students.
pub fn default_menu() -> Vec<MenuDay> {
    vec![
        menu_day("Monday", "Poha, Tea", "Roti, Dal, Veg Curry", "Chicken/Paneer, Rice"),
        menu_day("Tuesday", "Bread Butter, Coffee", "Biryani, Raita", "Tadka Dal, Rice, Salad"),
        menu_day("Wednesday", "Idli, Sambar", "Rajma Chawal", "Noodles, Veg Soup"),
        menu_day("Thursday", "Aloo Paratha", "South Indian Thali", "Egg Curry/Mutter Paneer"),
        menu_day("Friday", "Pancake", "Khichdi & Pickles", "Pizza & Salad"),
        menu_day("Saturday", "Vada Pav", "Chole Bhature", "Dal Makhani, Rice"),
        menu_day("Sunday", "Poori Sabzi", "Special Thali", "Burger & Fries"),
    ]
}
